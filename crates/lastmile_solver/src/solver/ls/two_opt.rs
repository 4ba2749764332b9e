use crate::{
    problem::dispatch_problem::DispatchProblem,
    solver::{ls::r#move::LocalSearchMove, route::WorkingRoute},
};

/// **2-Opt**
///
/// Reverses a contiguous segment of a single route.
///
/// ```text
/// BEFORE:  ... (A) -> [s] ... [e] -> (B) ...
/// AFTER:   ... (A) -> [e] ... [s] -> (B) ...
/// ```
///
/// With a symmetric metric only the two boundary legs change distance, but
/// the whole reversed tail still needs its time windows re-checked.
pub struct TwoOptOperator;

impl TwoOptOperator {
    pub fn generate_moves<C>(
        _problem: &DispatchProblem,
        routes: &[WorkingRoute],
        (r1, r2): (usize, usize),
        mut consumer: C,
    ) where
        C: FnMut(LocalSearchMove),
    {
        if r1 != r2 {
            return;
        }

        let len = routes[r1].len();
        for start in 0..len {
            for end in (start + 1)..len {
                consumer(LocalSearchMove::TwoOpt {
                    route: r1,
                    start,
                    end,
                });
            }
        }
    }
}
