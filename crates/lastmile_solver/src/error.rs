use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid static input. The offending truck or store is excluded from the
/// solve and reported in the plan; the rest of the fleet is still planned.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ConfigurationError {
    #[error("truck {truck_id} has non-positive capacity {capacity}")]
    NonPositiveCapacity { truck_id: String, capacity: f64 },

    #[error("truck {truck_id} has non-positive speed {speed} km/h")]
    NonPositiveSpeed { truck_id: String, speed: f64 },

    #[error("truck {truck_id} belongs to warehouse {warehouse_id}, expected {expected_warehouse_id}")]
    ForeignTruck {
        truck_id: String,
        warehouse_id: String,
        expected_warehouse_id: String,
    },

    #[error("store {store_id} has non-positive demand {demand}")]
    NonPositiveDemand { store_id: String, demand: f64 },

    #[error("store {store_id} has a time window that ends before it starts")]
    MalformedTimeWindow { store_id: String },

    #[error(
        "supplied distance matrix has {actual} entries, expected {expected} for {num_locations} locations"
    )]
    MalformedDistanceMatrix {
        num_locations: usize,
        expected: usize,
        actual: usize,
    },
}

/// Outcome of a feasibility probe. Not a failure: the search consumes these
/// to discard a candidate insertion or move, they never reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertionRejection {
    #[error("capacity exceeded")]
    CapacityExceeded,

    #[error("time window violated")]
    TimeWindowViolated,
}
