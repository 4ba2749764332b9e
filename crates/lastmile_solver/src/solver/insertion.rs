//! Feasibility probes. Everything here is pure: a probe computes a fully
//! recomputed candidate schedule and hands it back, the caller decides
//! whether to commit it. Nothing is ever mutated on a failed probe.

use crate::{
    error::InsertionRejection,
    problem::{dispatch_problem::DispatchProblem, meters::Meters, store::StoreIdx, truck::Truck},
    solver::route::{RouteSchedule, WorkingRoute},
};

/// A validated candidate insertion: where the store goes, what it costs,
/// and the schedule the route must adopt if it accepts.
#[derive(Debug)]
pub struct Insertion {
    position: usize,
    store_id: StoreIdx,
    delta_distance: Meters,
    schedule: RouteSchedule,
}

impl Insertion {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn store_id(&self) -> StoreIdx {
        self.store_id
    }

    pub fn delta_distance(&self) -> Meters {
        self.delta_distance
    }

    pub(crate) fn into_schedule(self) -> RouteSchedule {
        self.schedule
    }
}

/// Probes inserting `store_id` at `position` (0 ..= route.len()).
///
/// Checks capacity first, then walks the whole candidate sequence: the
/// inserted stop delays every stop after it, so each downstream window is
/// re-validated, not just the touched one.
pub fn evaluate_insertion(
    problem: &DispatchProblem,
    route: &WorkingRoute,
    position: usize,
    store_id: StoreIdx,
) -> Result<Insertion, InsertionRejection> {
    let truck = problem.truck(route.truck_id());
    let store = problem.store(store_id);

    if route.load() + store.demand() > truck.capacity() {
        return Err(InsertionRejection::CapacityExceeded);
    }

    let mut stops = Vec::with_capacity(route.len() + 1);
    stops.extend_from_slice(&route.stops()[..position]);
    stops.push(store_id);
    stops.extend_from_slice(&route.stops()[position..]);

    let schedule = evaluate_sequence(problem, truck, &stops)?;

    Ok(Insertion {
        position,
        store_id,
        delta_distance: marginal_distance(problem, route, position, store_id),
        schedule,
    })
}

/// Validates a whole candidate ordering for `truck` and returns its
/// schedule. Fails on the first capacity overrun, missed window, or breach
/// of the configured route duration ceiling.
pub fn evaluate_sequence(
    problem: &DispatchProblem,
    truck: &Truck,
    stops: &[StoreIdx],
) -> Result<RouteSchedule, InsertionRejection> {
    let mut arrivals = Vec::with_capacity(stops.len());
    let mut waits = Vec::with_capacity(stops.len());
    let mut load = 0.0;

    let mut at = problem.warehouse_location_id();
    let mut clock = problem.departure_time();

    for &stop in stops {
        let store = problem.store(stop);

        load += store.demand();
        if load > truck.capacity() {
            return Err(InsertionRejection::CapacityExceeded);
        }

        let location = problem.store_location_id(stop);
        let arrival = clock + problem.travel_time(truck, at, location);
        let service = store.time_window().service_time(arrival);

        if !store.time_window().admits(service) {
            return Err(InsertionRejection::TimeWindowViolated);
        }

        waits.push(service.duration_since(arrival));
        arrivals.push(service);
        clock = service;
        at = location;
    }

    if let Some(ceiling) = problem.max_route_duration()
        && clock.duration_since(problem.departure_time()) > ceiling
    {
        return Err(InsertionRejection::TimeWindowViolated);
    }

    Ok(RouteSchedule {
        arrivals,
        waits,
        load,
    })
}

/// Same walk as [`evaluate_sequence`] with no checks, for sequences already
/// known feasible (e.g. after removing a stop).
pub(crate) fn schedule_for(
    problem: &DispatchProblem,
    truck: &Truck,
    stops: &[StoreIdx],
) -> RouteSchedule {
    let mut arrivals = Vec::with_capacity(stops.len());
    let mut waits = Vec::with_capacity(stops.len());
    let mut load = 0.0;

    let mut at = problem.warehouse_location_id();
    let mut clock = problem.departure_time();

    for &stop in stops {
        let store = problem.store(stop);
        load += store.demand();

        let location = problem.store_location_id(stop);
        let arrival = clock + problem.travel_time(truck, at, location);
        let service = store.time_window().service_time(arrival);

        waits.push(service.duration_since(arrival));
        arrivals.push(service);
        clock = service;
        at = location;
    }

    RouteSchedule {
        arrivals,
        waits,
        load,
    }
}

/// Cost of the two new legs minus the leg they replace. Appending at the
/// end only adds one leg since routes do not return to the warehouse.
fn marginal_distance(
    problem: &DispatchProblem,
    route: &WorkingRoute,
    position: usize,
    store_id: StoreIdx,
) -> Meters {
    let store_location = problem.store_location_id(store_id);

    let previous = if position == 0 {
        problem.warehouse_location_id()
    } else {
        problem.store_location_id(route.stop(position - 1))
    };

    match route.stops().get(position) {
        Some(&next) => {
            let next_location = problem.store_location_id(next);
            problem.distance(previous, store_location)
                + problem.distance(store_location, next_location)
                - problem.distance(previous, next_location)
        }
        None => problem.distance(previous, store_location),
    }
}
