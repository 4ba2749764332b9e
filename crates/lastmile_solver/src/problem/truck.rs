use serde::{Deserialize, Serialize};

use crate::{define_index_newtype, error::ConfigurationError, problem::kmh::Kmh};

define_index_newtype!(TruckIdx, Truck);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    id: String,
    name: String,
    capacity: f64,
    speed: Kmh,
    warehouse_id: String,
}

impl Truck {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn speed(&self) -> Kmh {
        self.speed
    }

    pub fn warehouse_id(&self) -> &str {
        &self.warehouse_id
    }

    /// Static validation against the warehouse the solve is running for.
    pub fn validate(&self, expected_warehouse_id: &str) -> Result<(), ConfigurationError> {
        if self.capacity <= 0.0 {
            return Err(ConfigurationError::NonPositiveCapacity {
                truck_id: self.id.clone(),
                capacity: self.capacity,
            });
        }

        if !self.speed.is_positive() {
            return Err(ConfigurationError::NonPositiveSpeed {
                truck_id: self.id.clone(),
                speed: self.speed.value(),
            });
        }

        if self.warehouse_id != expected_warehouse_id {
            return Err(ConfigurationError::ForeignTruck {
                truck_id: self.id.clone(),
                warehouse_id: self.warehouse_id.clone(),
                expected_warehouse_id: expected_warehouse_id.to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct TruckBuilder {
    id: Option<String>,
    name: Option<String>,
    capacity: f64,
    speed: Option<Kmh>,
    warehouse_id: Option<String>,
}

impl TruckBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_speed(mut self, speed: Kmh) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_warehouse_id(mut self, warehouse_id: impl Into<String>) -> Self {
        self.warehouse_id = Some(warehouse_id.into());
        self
    }

    pub fn build(self) -> Truck {
        let id = self.id.unwrap_or_default();
        Truck {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            capacity: self.capacity,
            speed: self.speed.unwrap_or(Kmh::new(50.0)),
            warehouse_id: self.warehouse_id.unwrap_or_default(),
        }
    }
}
