use crate::{
    problem::dispatch_problem::DispatchProblem,
    solver::{ls::r#move::LocalSearchMove, route::WorkingRoute},
};

/// **Relocate**
///
/// Moves a single stop to a new position on the same route (`r1 == r2`) or
/// onto another truck's route. An inter-route relocation is accepted only
/// when the combined distance of source and destination decreases and the
/// destination stays feasible, which [`LocalSearchMove`] enforces.
pub struct RelocateOperator;

impl RelocateOperator {
    pub fn generate_moves<C>(
        _problem: &DispatchProblem,
        routes: &[WorkingRoute],
        (r1, r2): (usize, usize),
        mut consumer: C,
    ) where
        C: FnMut(LocalSearchMove),
    {
        if r1 == r2 {
            let len = routes[r1].len();
            for from in 0..len {
                for to in 0..=len {
                    // `to == from` and `to == from + 1` re-create the same
                    // sequence.
                    if to == from || to == from + 1 {
                        continue;
                    }

                    consumer(LocalSearchMove::Relocate {
                        from_route: r1,
                        from,
                        to_route: r1,
                        to,
                    });
                }
            }
        } else {
            for from in 0..routes[r1].len() {
                for to in 0..=routes[r2].len() {
                    consumer(LocalSearchMove::Relocate {
                        from_route: r1,
                        from,
                        to_route: r2,
                        to,
                    });
                }
            }
        }
    }
}
