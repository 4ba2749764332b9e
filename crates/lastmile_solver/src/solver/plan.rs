use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigurationError, problem::meters::Meters};

/// One truck's planned route. Matches the shape the storage layer persists
/// as a `routes` row; `distance` and `estimated_time` are derived from the
/// final stop sequence and never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: String,
    pub warehouse_id: String,
    pub truck_id: String,
    pub distance: Meters,
    pub estimated_time: SignedDuration,
}

/// A `route_stores` row: one visit, ordered by `sequence_number` within its
/// route (contiguous, zero-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStopRecord {
    pub route_id: String,
    pub store_id: String,
    pub sequence_number: u32,
}

/// Complete solver output for one planning run.
///
/// `unserved` lists stores no truck could feasibly carry — a normal,
/// reportable outcome. `exclusions` lists trucks and stores dropped during
/// static validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub routes: Vec<RouteRecord>,
    pub stops: Vec<RouteStopRecord>,
    pub unserved: Vec<String>,
    pub exclusions: Vec<ConfigurationError>,
}

impl DispatchPlan {
    pub fn total_distance(&self) -> Meters {
        self.routes.iter().map(|route| route.distance).sum()
    }

    pub fn stops_of<'a>(&'a self, route_id: &'a str) -> impl Iterator<Item = &'a RouteStopRecord> {
        self.stops
            .iter()
            .filter(move |stop| stop.route_id == route_id)
    }
}
