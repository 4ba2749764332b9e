use crate::{
    problem::dispatch_problem::DispatchProblem,
    solver::{ls::r#move::LocalSearchMove, route::WorkingRoute},
};

/// **Intra-route Swap**
///
/// Exchanges the stops at two positions of the same route. Subsumed by a
/// pair of relocations in theory, but as a single move it is accepted or
/// rejected atomically, which a relocation pair cannot guarantee.
pub struct SwapOperator;

impl SwapOperator {
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
        for first in 0..len {
            for second in (first + 1)..len {
                consumer(LocalSearchMove::Swap {
                    route: r1,
                    first,
                    second,
                });
            }
        }
    }
}
