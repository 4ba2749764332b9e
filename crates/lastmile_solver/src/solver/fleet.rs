use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    problem::{dispatch_problem::DispatchProblem, store::StoreIdx, truck::TruckIdx},
    solver::{
        construction::RouteBuilder,
        insertion,
        ls::local_search::LocalSearch,
        params::SolverParams,
        plan::{DispatchPlan, RouteRecord, RouteStopRecord},
        route::WorkingRoute,
    },
};

/// Top-level orchestration: partition the warehouse's demand across its
/// fleet, build an initial route per truck, improve across the fleet, and
/// emit the final records.
///
/// The solve never fails because stores are unservable; that is a valid,
/// complete answer carried in [`DispatchPlan::unserved`].
pub struct FleetSolver {
    params: SolverParams,
}

impl FleetSolver {
    pub fn new(params: SolverParams) -> Self {
        FleetSolver { params }
    }

    pub fn with_defaults() -> Self {
        FleetSolver::new(SolverParams::default())
    }

    #[instrument(skip_all, fields(warehouse = problem.warehouse().id()))]
    pub fn solve(&self, problem: &DispatchProblem) -> DispatchPlan {
        let mut unserved: Vec<StoreIdx> = Vec::new();

        // Stores whose demand exceeds every truck can never fit anywhere.
        let max_capacity = problem.max_truck_capacity();
        let mut pending: Vec<StoreIdx> = Vec::new();
        for index in 0..problem.stores().len() {
            let store_id = StoreIdx::new(index);
            match max_capacity {
                Some(capacity) if problem.store(store_id).demand() <= capacity => {
                    pending.push(store_id);
                }
                _ => {
                    debug!(
                        store = problem.store(store_id).id(),
                        "demand exceeds every truck capacity"
                    );
                    unserved.push(store_id);
                }
            }
        }

        sort_by_distance_from_warehouse(problem, &mut pending);

        // Partition: offer each store to the least-loaded truck that can
        // feasibly take it.
        let mut routes: Vec<WorkingRoute> = (0..problem.trucks().len())
            .map(|index| WorkingRoute::empty(TruckIdx::new(index)))
            .collect();
        let mut assignments: Vec<Vec<StoreIdx>> = vec![Vec::new(); routes.len()];

        for store_id in pending {
            match assign_store(problem, &mut routes, store_id) {
                Some(truck) => assignments[truck].push(store_id),
                None => {
                    debug!(store = problem.store(store_id).id(), "no feasible truck");
                    unserved.push(store_id);
                }
            }
        }

        // Initial construction: independent per truck, run on a worker
        // pool bounded by the fleet size.
        self.build_initial_routes(problem, &mut routes, &mut assignments);

        // A rebuilt route may order its stops differently than the
        // incremental partition did and strand some of them; offer those
        // to the whole fleet once more before giving up.
        let mut leftovers: Vec<StoreIdx> = assignments.into_iter().flatten().collect();
        sort_by_distance_from_warehouse(problem, &mut leftovers);
        for store_id in leftovers {
            if assign_store(problem, &mut routes, store_id).is_none() {
                debug!(
                    store = problem.store(store_id).id(),
                    "stranded by rebuild, no feasible truck"
                );
                unserved.push(store_id);
            }
        }

        let stats = LocalSearch::new(&self.params).improve(problem, &mut routes);

        let plan = finalize(problem, &routes, &unserved);
        info!(
            routes = plan.routes.len(),
            served = plan.stops.len(),
            unserved = plan.unserved.len(),
            improvement_passes = stats.passes,
            total_distance = plan.total_distance().value(),
            "solve finished"
        );

        plan
    }

    fn build_initial_routes(
        &self,
        problem: &DispatchProblem,
        routes: &mut Vec<WorkingRoute>,
        assignments: &mut Vec<Vec<StoreIdx>>,
    ) {
        let threads = self
            .params
            .build_threads
            .number_of_threads()
            .min(routes.len().max(1));

        let rebuild = |routes: &mut Vec<WorkingRoute>, assignments: &mut Vec<Vec<StoreIdx>>| {
            routes
                .par_iter_mut()
                .zip(assignments.par_iter_mut())
                .for_each(|(route, pool)| {
                    *route = RouteBuilder::build(problem, route.truck_id(), pool);
                });
        };

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(worker_pool) => worker_pool.install(|| rebuild(routes, assignments)),
            Err(error) => {
                warn!(%error, "worker pool unavailable, building on the current thread");
                for (route, pool) in routes.iter_mut().zip(assignments.iter_mut()) {
                    *route = RouteBuilder::build(problem, route.truck_id(), pool);
                }
            }
        }
    }
}

fn sort_by_distance_from_warehouse(problem: &DispatchProblem, stores: &mut [StoreIdx]) {
    stores.sort_by(|&a, &b| {
        problem
            .distance_from_warehouse(a)
            .cmp(&problem.distance_from_warehouse(b))
            .then_with(|| problem.store(a).id().cmp(problem.store(b).id()))
    });
}

/// Offers one store to the fleet: trucks are tried in ascending load-ratio
/// order (ties by truck id), each via its cheapest feasible insertion. The
/// first truck with any feasible position takes the store.
fn assign_store(
    problem: &DispatchProblem,
    routes: &mut [WorkingRoute],
    store_id: StoreIdx,
) -> Option<usize> {
    let mut order: Vec<usize> = (0..routes.len()).collect();
    order.sort_by(|&a, &b| {
        let ratio_a = routes[a].load() / problem.truck(routes[a].truck_id()).capacity();
        let ratio_b = routes[b].load() / problem.truck(routes[b].truck_id()).capacity();
        ratio_a.total_cmp(&ratio_b).then_with(|| {
            problem
                .truck(routes[a].truck_id())
                .id()
                .cmp(problem.truck(routes[b].truck_id()).id())
        })
    });

    for truck in order {
        if let Some(best) =
            RouteBuilder::cheapest_insertion(problem, &routes[truck], &[store_id])
        {
            routes[truck].apply(best);
            return Some(truck);
        }
    }

    None
}

/// Builds the output records from the settled routes. Distances, times and
/// sequence numbers are all recomputed from scratch here; nothing carried
/// through the search is trusted.
fn finalize(
    problem: &DispatchProblem,
    routes: &[WorkingRoute],
    unserved: &[StoreIdx],
) -> DispatchPlan {
    let mut route_records = Vec::new();
    let mut stop_records = Vec::new();

    for route in routes.iter().filter(|route| !route.is_empty()) {
        let truck = problem.truck(route.truck_id());
        let route_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, truck.id().as_bytes()).to_string();

        let schedule = insertion::schedule_for(problem, truck, route.stops());
        let estimated_time = match schedule.arrivals.last() {
            Some(&last) => last.duration_since(problem.departure_time()),
            None => jiff::SignedDuration::ZERO,
        };

        route_records.push(RouteRecord {
            id: route_id.clone(),
            warehouse_id: problem.warehouse().id().to_string(),
            truck_id: truck.id().to_string(),
            distance: route.distance(problem),
            estimated_time,
        });

        for (sequence_number, &stop) in route.stops().iter().enumerate() {
            stop_records.push(RouteStopRecord {
                route_id: route_id.clone(),
                store_id: problem.store(stop).id().to_string(),
                sequence_number: sequence_number as u32,
            });
        }
    }

    DispatchPlan {
        routes: route_records,
        stops: stop_records,
        unserved: unserved
            .iter()
            .map(|&store_id| problem.store(store_id).id().to_string())
            .collect(),
        exclusions: problem.exclusions().to_vec(),
    }
}
