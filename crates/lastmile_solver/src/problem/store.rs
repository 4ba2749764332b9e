use serde::{Deserialize, Serialize};

use crate::{
    define_index_newtype,
    problem::{location::Location, time_window::TimeWindow},
};

define_index_newtype!(StoreIdx, Store);

/// A delivery point with a positive demand and an optional delivery window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    demand: f64,
    #[serde(default)]
    time_window: TimeWindow,
}

impl Store {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn location(&self) -> Location {
        Location::from_lat_lon(self.latitude, self.longitude)
    }
}

#[derive(Default)]
pub struct StoreBuilder {
    id: Option<String>,
    name: Option<String>,
    latitude: f64,
    longitude: f64,
    demand: f64,
    time_window: TimeWindow,
}

impl StoreBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    pub fn with_time_window(mut self, time_window: TimeWindow) -> Self {
        self.time_window = time_window;
        self
    }

    pub fn build(self) -> Store {
        let id = self.id.unwrap_or_default();
        Store {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            demand: self.demand,
            time_window: self.time_window,
        }
    }
}
