use jiff::{SignedDuration, Timestamp};

use crate::{
    problem::{dispatch_problem::DispatchProblem, meters::Meters, store::StoreIdx, truck::TruckIdx},
    solver::insertion::{self, Insertion},
};

/// Arrival data for one stop ordering. `arrivals[i]` is the service time at
/// stop `i` (waiting already applied), `waits[i]` the time spent idling
/// before a window opened. Adopted atomically together with the ordering
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSchedule {
    pub(crate) arrivals: Vec<Timestamp>,
    pub(crate) waits: Vec<SignedDuration>,
    pub(crate) load: f64,
}

impl RouteSchedule {
    pub fn empty() -> Self {
        RouteSchedule {
            arrivals: Vec::new(),
            waits: Vec::new(),
            load: 0.0,
        }
    }

    pub fn total_waiting(&self) -> SignedDuration {
        self.waits.iter().sum()
    }
}

/// One truck's route while the solve is running: an ordered stop sequence
/// plus the schedule that matches it. The two are only ever replaced
/// together, never patched in place.
#[derive(Debug, Clone)]
pub struct WorkingRoute {
    truck_id: TruckIdx,
    stops: Vec<StoreIdx>,
    schedule: RouteSchedule,
}

impl WorkingRoute {
    pub fn empty(truck_id: TruckIdx) -> Self {
        WorkingRoute {
            truck_id,
            stops: Vec::new(),
            schedule: RouteSchedule::empty(),
        }
    }

    pub fn truck_id(&self) -> TruckIdx {
        self.truck_id
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[StoreIdx] {
        &self.stops
    }

    pub fn stop(&self, position: usize) -> StoreIdx {
        self.stops[position]
    }

    pub fn load(&self) -> f64 {
        self.schedule.load
    }

    pub fn arrival_time(&self, position: usize) -> Timestamp {
        self.schedule.arrivals[position]
    }

    pub fn waiting_duration(&self, position: usize) -> SignedDuration {
        self.schedule.waits[position]
    }

    pub fn total_waiting(&self) -> SignedDuration {
        self.schedule.total_waiting()
    }

    /// Commits an insertion previously validated by
    /// [`insertion::evaluate_insertion`] against this exact route state.
    pub fn apply(&mut self, insertion: Insertion) {
        self.stops.insert(insertion.position(), insertion.store_id());
        self.schedule = insertion.into_schedule();
    }

    /// Replaces the whole stop ordering, schedule included.
    pub fn replace(&mut self, stops: Vec<StoreIdx>, schedule: RouteSchedule) {
        self.stops = stops;
        self.schedule = schedule;
    }

    /// Dropping a stop only moves later arrivals earlier (the metric obeys
    /// the triangle inequality), so the remaining sequence stays feasible
    /// and the schedule can be rebuilt without revalidation.
    pub fn remove_stop(&mut self, problem: &DispatchProblem, position: usize) -> StoreIdx {
        let removed = self.stops.remove(position);
        self.schedule =
            insertion::schedule_for(problem, problem.truck(self.truck_id), &self.stops);
        removed
    }

    /// Total distance recomputed from the legs: warehouse, first stop, ...,
    /// last stop. No return leg.
    pub fn distance(&self, problem: &DispatchProblem) -> Meters {
        let mut distance = Meters::ZERO;
        let mut at = problem.warehouse_location_id();

        for &stop in &self.stops {
            let next = problem.store_location_id(stop);
            distance += problem.distance(at, next);
            at = next;
        }

        distance
    }

    /// Travel plus waiting, i.e. last service time minus departure.
    pub fn duration(&self, problem: &DispatchProblem) -> SignedDuration {
        match self.schedule.arrivals.last() {
            Some(&last) => last.duration_since(problem.departure_time()),
            None => SignedDuration::ZERO,
        }
    }
}
