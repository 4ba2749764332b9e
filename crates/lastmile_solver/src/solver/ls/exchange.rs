use crate::{
    problem::dispatch_problem::DispatchProblem,
    solver::{ls::r#move::LocalSearchMove, route::WorkingRoute},
};

/// **Exchange**
///
/// Swaps one stop between two different routes. Useful where a relocation
/// alone would overload the destination truck but trading stops keeps both
/// within capacity.
pub struct ExchangeOperator;

impl ExchangeOperator {
    pub fn generate_moves<C>(
        _problem: &DispatchProblem,
        routes: &[WorkingRoute],
        (r1, r2): (usize, usize),
        mut consumer: C,
    ) where
        C: FnMut(LocalSearchMove),
    {
        // Symmetric move, only emitted for ordered pairs.
        if r1 >= r2 {
            return;
        }

        for first in 0..routes[r1].len() {
            for second in 0..routes[r2].len() {
                consumer(LocalSearchMove::Exchange {
                    first_route: r1,
                    first,
                    second_route: r2,
                    second,
                });
            }
        }
    }
}
