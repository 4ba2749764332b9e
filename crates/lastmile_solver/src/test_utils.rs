//! Fixture helpers for unit tests. Planar fixtures use euclidean distances
//! with coordinates in meters (x as longitude, y as latitude) and trucks at
//! 36 km/h, i.e. 10 m/s, so travel times come out in round numbers.

use jiff::{SignedDuration, Timestamp};

use crate::problem::{
    dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
    distance_method::DistanceMethod,
    kmh::Kmh,
    store::{Store, StoreBuilder},
    time_window::TimeWindow,
    truck::{Truck, TruckBuilder},
    warehouse::Warehouse,
};

pub(crate) const TEST_WAREHOUSE_ID: &str = "wh-1";

pub(crate) fn ts(value: &str) -> Timestamp {
    value.parse().expect("valid timestamp literal")
}

pub(crate) fn test_warehouse() -> Warehouse {
    Warehouse::new(TEST_WAREHOUSE_ID, "Central depot", 0.0, 0.0)
}

/// Store `demand` units at planar position (`x_km`, `y_km`) kilometers from
/// the warehouse.
pub(crate) fn store_at(id: &str, x_km: f64, y_km: f64, demand: f64) -> Store {
    StoreBuilder::default()
        .with_id(id)
        .with_position(y_km * 1000.0, x_km * 1000.0)
        .with_demand(demand)
        .build()
}

pub(crate) fn truck_with_capacity(id: &str, capacity: f64) -> Truck {
    TruckBuilder::default()
        .with_id(id)
        .with_capacity(capacity)
        .with_speed(Kmh::new(36.0))
        .with_warehouse_id(TEST_WAREHOUSE_ID)
        .build()
}

pub(crate) fn planar_problem(trucks: Vec<Truck>, stores: Vec<Store>) -> DispatchProblem {
    DispatchProblemBuilder::new(test_warehouse())
        .with_trucks(trucks)
        .with_stores(stores)
        .with_distance_method(DistanceMethod::Euclidean)
        .build()
}

pub(crate) trait StoreTestExt {
    fn windowed(self, start: Option<Timestamp>, end: Option<Timestamp>) -> Store;
}

impl StoreTestExt for Store {
    fn windowed(self, start: Option<Timestamp>, end: Option<Timestamp>) -> Store {
        let location = self.location();
        StoreBuilder::default()
            .with_id(self.id())
            .with_name(self.name())
            .with_position(location.lat(), location.lon())
            .with_demand(self.demand())
            .with_time_window(TimeWindow::new(start, end))
            .build()
    }
}

pub(crate) trait ProblemTestExt {
    fn rebuilt_with_ceiling(self, ceiling: SignedDuration) -> DispatchProblem;
    fn rebuilt_with_departure(self, departure_time: Timestamp) -> DispatchProblem;
}

impl ProblemTestExt for DispatchProblem {
    fn rebuilt_with_ceiling(self, ceiling: SignedDuration) -> DispatchProblem {
        DispatchProblemBuilder::new(self.warehouse().clone())
            .with_trucks(self.trucks().to_vec())
            .with_stores(self.stores().to_vec())
            .with_distance_method(DistanceMethod::Euclidean)
            .with_max_route_duration(ceiling)
            .build()
    }

    fn rebuilt_with_departure(self, departure_time: Timestamp) -> DispatchProblem {
        DispatchProblemBuilder::new(self.warehouse().clone())
            .with_trucks(self.trucks().to_vec())
            .with_stores(self.stores().to_vec())
            .with_distance_method(DistanceMethod::Euclidean)
            .with_departure_time(departure_time)
            .build()
    }
}
