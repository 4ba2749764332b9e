use crate::{
    problem::{dispatch_problem::DispatchProblem, meters::Meters, store::StoreIdx},
    solver::{insertion, route::WorkingRoute},
};

/// An improvement move over one or two routes. A move is first ranked by
/// its distance delta, then validated into an [`AppliedMove`] which holds
/// the complete new orderings and schedules; only that validated state ever
/// touches the fleet.
#[derive(Debug, Clone, Copy)]
pub enum LocalSearchMove {
    /// Reverses the contiguous segment `start..=end` of one route.
    TwoOpt {
        route: usize,
        start: usize,
        end: usize,
    },
    /// Exchanges the stops at two positions of one route.
    Swap {
        route: usize,
        first: usize,
        second: usize,
    },
    /// Moves one stop to another position, on the same or another route.
    Relocate {
        from_route: usize,
        from: usize,
        to_route: usize,
        to: usize,
    },
    /// Swaps one stop between two routes.
    Exchange {
        first_route: usize,
        first: usize,
        second_route: usize,
        second: usize,
    },
}

/// Fully validated candidate state: for every touched route, the new stop
/// ordering plus the schedule proving it feasible. Committed atomically.
pub struct AppliedMove {
    updates: Vec<RouteUpdate>,
}

struct RouteUpdate {
    route: usize,
    stops: Vec<StoreIdx>,
    schedule: crate::solver::route::RouteSchedule,
}

impl AppliedMove {
    pub fn commit(self, routes: &mut [WorkingRoute]) {
        for update in self.updates {
            routes[update.route].replace(update.stops, update.schedule);
        }
    }
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::TwoOpt { .. } => "Two-Opt",
            LocalSearchMove::Swap { .. } => "Swap",
            LocalSearchMove::Relocate { .. } => "Relocate",
            LocalSearchMove::Exchange { .. } => "Exchange",
        }
    }

    /// Distance change if this move were applied; negative is better.
    /// Cheap to compute, so it gates the full feasibility validation.
    pub fn delta(&self, problem: &DispatchProblem, routes: &[WorkingRoute]) -> Meters {
        let mut delta = Meters::ZERO;
        for (route, stops) in self.candidate_sequences(routes) {
            delta += sequence_distance(problem, &stops) - routes[route].distance(problem);
        }
        delta
    }

    /// Revalidates every touched route in full, cascading arrival times
    /// through the reordered sequences. `None` means the move is infeasible
    /// and must be discarded.
    pub fn validate(&self, problem: &DispatchProblem, routes: &[WorkingRoute]) -> Option<AppliedMove> {
        let mut updates = Vec::with_capacity(2);

        for (route, stops) in self.candidate_sequences(routes) {
            let truck = problem.truck(routes[route].truck_id());
            let schedule = insertion::evaluate_sequence(problem, truck, &stops).ok()?;
            updates.push(RouteUpdate {
                route,
                stops,
                schedule,
            });
        }

        Some(AppliedMove { updates })
    }

    /// New stop orderings for the route(s) this move touches.
    fn candidate_sequences(&self, routes: &[WorkingRoute]) -> Vec<(usize, Vec<StoreIdx>)> {
        match *self {
            LocalSearchMove::TwoOpt { route, start, end } => {
                let mut stops = routes[route].stops().to_vec();
                stops[start..=end].reverse();
                vec![(route, stops)]
            }
            LocalSearchMove::Swap {
                route,
                first,
                second,
            } => {
                let mut stops = routes[route].stops().to_vec();
                stops.swap(first, second);
                vec![(route, stops)]
            }
            LocalSearchMove::Relocate {
                from_route,
                from,
                to_route,
                to,
            } if from_route == to_route => {
                let mut stops = routes[from_route].stops().to_vec();
                let moved = stops.remove(from);
                stops.insert(if to > from { to - 1 } else { to }, moved);
                vec![(from_route, stops)]
            }
            LocalSearchMove::Relocate {
                from_route,
                from,
                to_route,
                to,
            } => {
                let mut source = routes[from_route].stops().to_vec();
                let moved = source.remove(from);
                let mut destination = routes[to_route].stops().to_vec();
                destination.insert(to, moved);
                vec![(from_route, source), (to_route, destination)]
            }
            LocalSearchMove::Exchange {
                first_route,
                first,
                second_route,
                second,
            } => {
                let mut stops1 = routes[first_route].stops().to_vec();
                let mut stops2 = routes[second_route].stops().to_vec();
                std::mem::swap(&mut stops1[first], &mut stops2[second]);
                vec![(first_route, stops1), (second_route, stops2)]
            }
        }
    }
}

/// Leg sum warehouse -> first -> ... -> last for an arbitrary ordering.
pub(crate) fn sequence_distance(problem: &DispatchProblem, stops: &[StoreIdx]) -> Meters {
    let mut distance = Meters::ZERO;
    let mut at = problem.warehouse_location_id();

    for &stop in stops {
        let next = problem.store_location_id(stop);
        distance += problem.distance(at, next);
        at = next;
    }

    distance
}
