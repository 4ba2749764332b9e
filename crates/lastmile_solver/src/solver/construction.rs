use tracing::{Level, debug, instrument};

use crate::{
    problem::{dispatch_problem::DispatchProblem, store::StoreIdx, truck::TruckIdx},
    solver::{
        insertion::{self, Insertion},
        route::WorkingRoute,
    },
};

/// Initial route construction: cheapest feasible insertion.
///
/// Deliberately the simple O(stores^2) variant that scans every candidate
/// position for every unassigned store. Fleets of a single warehouse stay
/// in the tens-to-low-hundreds of stores, where auditability beats
/// asymptotics.
pub struct RouteBuilder;

impl RouteBuilder {
    /// Builds one truck's route from its assigned pool. Stores left in the
    /// pool afterwards had no feasible position on this truck; the caller
    /// decides what becomes of them.
    #[instrument(skip_all, level = Level::DEBUG, fields(truck = truck_id.get()))]
    pub fn build(
        problem: &DispatchProblem,
        truck_id: TruckIdx,
        pool: &mut Vec<StoreIdx>,
    ) -> WorkingRoute {
        let mut route = WorkingRoute::empty(truck_id);

        while let Some(best) = Self::cheapest_insertion(problem, &route, pool) {
            debug!(
                store = problem.store(best.store_id()).id(),
                position = best.position(),
                cost = best.delta_distance().value(),
                "insert"
            );

            pool.retain(|&store_id| store_id != best.store_id());
            route.apply(best);
        }

        route
    }

    /// Minimum-marginal-cost feasible (store, position) pair over the pool,
    /// or `None` when nothing fits. Ties go to the smallest store id, then
    /// the lowest position, so repeated runs pick the same candidate.
    pub fn cheapest_insertion(
        problem: &DispatchProblem,
        route: &WorkingRoute,
        pool: &[StoreIdx],
    ) -> Option<Insertion> {
        let mut best: Option<Insertion> = None;

        for &store_id in pool {
            for position in 0..=route.len() {
                let Ok(candidate) = insertion::evaluate_insertion(problem, route, position, store_id)
                else {
                    continue;
                };

                if is_better(problem, &candidate, best.as_ref()) {
                    best = Some(candidate);
                }
            }
        }

        best
    }
}

fn is_better(problem: &DispatchProblem, candidate: &Insertion, best: Option<&Insertion>) -> bool {
    let Some(best) = best else {
        return true;
    };

    if candidate.delta_distance() != best.delta_distance() {
        return candidate.delta_distance() < best.delta_distance();
    }

    let candidate_id = problem.store(candidate.store_id()).id();
    let best_id = problem.store(best.store_id()).id();

    (candidate_id, candidate.position()) < (best_id, best.position())
}
