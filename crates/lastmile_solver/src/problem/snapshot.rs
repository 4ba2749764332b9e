use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::problem::{
    dispatch_problem::{DispatchProblem, DispatchProblemBuilder},
    distance_method::DistanceMethod,
    store::Store,
    truck::Truck,
    warehouse::Warehouse,
};

/// Wire shape of one planning run: the record sets the storage layer hands
/// over, plus the few knobs that are part of the input rather than of the
/// search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSnapshot {
    pub warehouse: Warehouse,
    pub trucks: Vec<Truck>,
    pub stores: Vec<Store>,
    #[serde(default)]
    pub departure_time: Option<Timestamp>,
    #[serde(default)]
    pub distance_method: DistanceMethod,
    #[serde(default)]
    pub max_route_duration: Option<SignedDuration>,
}

impl DispatchSnapshot {
    pub fn into_problem(self) -> DispatchProblem {
        let mut builder = DispatchProblemBuilder::new(self.warehouse)
            .with_trucks(self.trucks)
            .with_stores(self.stores)
            .with_distance_method(self.distance_method);

        if let Some(departure_time) = self.departure_time {
            builder = builder.with_departure_time(departure_time);
        }

        if let Some(ceiling) = self.max_route_duration {
            builder = builder.with_max_route_duration(ceiling);
        }

        builder.build()
    }
}
