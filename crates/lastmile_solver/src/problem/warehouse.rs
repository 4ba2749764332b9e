use serde::{Deserialize, Serialize};

use crate::problem::location::Location;

/// The single depot of a planning run. `storage_capacity` comes from the
/// source records but is informational only, it never constrains routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    storage_capacity: f64,
}

impl Warehouse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Warehouse {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            storage_capacity: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage_capacity(&self) -> f64 {
        self.storage_capacity
    }

    pub fn location(&self) -> Location {
        Location::from_lat_lon(self.latitude, self.longitude)
    }
}
