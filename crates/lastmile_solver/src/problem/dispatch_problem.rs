use jiff::{SignedDuration, Timestamp};
use tracing::warn;

use crate::{
    error::ConfigurationError,
    problem::{
        distance_method::DistanceMethod,
        location::{Location, LocationIdx},
        matrix::DistanceMatrix,
        meters::Meters,
        store::{Store, StoreIdx},
        truck::{Truck, TruckIdx},
        warehouse::Warehouse,
    },
};

/// Immutable input snapshot for one planning run.
///
/// Trucks and stores that failed static validation are excluded here and
/// reported via [`DispatchProblem::exclusions`]; everything the solver sees
/// through this type is well-formed. Location 0 is the warehouse, store `i`
/// sits at location `i + 1`.
pub struct DispatchProblem {
    warehouse: Warehouse,
    trucks: Vec<Truck>,
    stores: Vec<Store>,
    matrix: DistanceMatrix,
    departure_time: Timestamp,
    max_route_duration: Option<SignedDuration>,
    exclusions: Vec<ConfigurationError>,
}

impl DispatchProblem {
    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn truck(&self, id: TruckIdx) -> &Truck {
        &self.trucks[id.get()]
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn store(&self, id: StoreIdx) -> &Store {
        &self.stores[id.get()]
    }

    pub fn departure_time(&self) -> Timestamp {
        self.departure_time
    }

    pub fn max_route_duration(&self) -> Option<SignedDuration> {
        self.max_route_duration
    }

    pub fn exclusions(&self) -> &[ConfigurationError] {
        &self.exclusions
    }

    pub fn warehouse_location_id(&self) -> LocationIdx {
        LocationIdx::new(0)
    }

    pub fn store_location_id(&self, store_id: StoreIdx) -> LocationIdx {
        LocationIdx::new(store_id.get() + 1)
    }

    pub fn distance(&self, from: LocationIdx, to: LocationIdx) -> Meters {
        self.matrix.distance(from, to)
    }

    pub fn distance_from_warehouse(&self, store_id: StoreIdx) -> Meters {
        self.matrix
            .distance(self.warehouse_location_id(), self.store_location_id(store_id))
    }

    pub fn travel_time(&self, truck: &Truck, from: LocationIdx, to: LocationIdx) -> SignedDuration {
        self.matrix.distance(from, to).travel_time(truck.speed())
    }

    /// Largest capacity in the surviving fleet, `None` for an empty fleet.
    pub fn max_truck_capacity(&self) -> Option<f64> {
        self.trucks
            .iter()
            .map(|truck| truck.capacity())
            .max_by(f64::total_cmp)
    }
}

pub struct DispatchProblemBuilder {
    warehouse: Warehouse,
    trucks: Vec<Truck>,
    stores: Vec<Store>,
    distance_method: DistanceMethod,
    external_matrix: Option<Vec<f64>>,
    departure_time: Timestamp,
    max_route_duration: Option<SignedDuration>,
}

impl DispatchProblemBuilder {
    pub fn new(warehouse: Warehouse) -> Self {
        DispatchProblemBuilder {
            warehouse,
            trucks: Vec::new(),
            stores: Vec::new(),
            distance_method: DistanceMethod::default(),
            external_matrix: None,
            departure_time: Timestamp::UNIX_EPOCH,
            max_route_duration: None,
        }
    }

    pub fn with_trucks(mut self, trucks: Vec<Truck>) -> Self {
        self.trucks = trucks;
        self
    }

    pub fn with_stores(mut self, stores: Vec<Store>) -> Self {
        self.stores = stores;
        self
    }

    pub fn with_distance_method(mut self, method: DistanceMethod) -> Self {
        self.distance_method = method;
        self
    }

    /// Externally supplied distances, row-major over warehouse + surviving
    /// stores in input order. Replaces the computed metric.
    pub fn with_flat_matrix(mut self, distances: Vec<f64>) -> Self {
        self.external_matrix = Some(distances);
        self
    }

    pub fn with_departure_time(mut self, departure_time: Timestamp) -> Self {
        self.departure_time = departure_time;
        self
    }

    pub fn with_max_route_duration(mut self, ceiling: SignedDuration) -> Self {
        self.max_route_duration = Some(ceiling);
        self
    }

    pub fn build(self) -> DispatchProblem {
        let mut exclusions = Vec::new();

        let trucks: Vec<Truck> = self
            .trucks
            .into_iter()
            .filter(|truck| match truck.validate(self.warehouse.id()) {
                Ok(()) => true,
                Err(error) => {
                    warn!(truck_id = truck.id(), %error, "excluding truck");
                    exclusions.push(error);
                    false
                }
            })
            .collect();

        let stores: Vec<Store> = self
            .stores
            .into_iter()
            .filter(|store| match validate_store(store) {
                Ok(()) => true,
                Err(error) => {
                    warn!(store_id = store.id(), %error, "excluding store");
                    exclusions.push(error);
                    false
                }
            })
            .collect();

        let mut locations: Vec<Location> = Vec::with_capacity(stores.len() + 1);
        locations.push(self.warehouse.location());
        locations.extend(stores.iter().map(|store| store.location()));

        let matrix = match self.external_matrix {
            Some(distances) => match DistanceMatrix::from_flat(distances, locations.len()) {
                Ok(matrix) => matrix,
                Err(error) => {
                    warn!(%error, "ignoring supplied distance matrix");
                    exclusions.push(error);
                    DistanceMatrix::compute(&locations, self.distance_method)
                }
            },
            None => DistanceMatrix::compute(&locations, self.distance_method),
        };

        DispatchProblem {
            warehouse: self.warehouse,
            trucks,
            stores,
            matrix,
            departure_time: self.departure_time,
            max_route_duration: self.max_route_duration,
            exclusions,
        }
    }
}

fn validate_store(store: &Store) -> Result<(), ConfigurationError> {
    if store.demand() <= 0.0 {
        return Err(ConfigurationError::NonPositiveDemand {
            store_id: store.id().to_string(),
            demand: store.demand(),
        });
    }

    if !store.time_window().is_well_formed() {
        return Err(ConfigurationError::MalformedTimeWindow {
            store_id: store.id().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{kmh::Kmh, store::StoreBuilder, truck::TruckBuilder};

    fn warehouse() -> Warehouse {
        Warehouse::new("wh-1", "Depot", 0.0, 0.0)
    }

    #[test]
    fn invalid_trucks_and_stores_are_excluded_and_reported() {
        let trucks = vec![
            TruckBuilder::default()
                .with_id("t-ok")
                .with_capacity(100.0)
                .with_speed(Kmh::new(40.0))
                .with_warehouse_id("wh-1")
                .build(),
            TruckBuilder::default()
                .with_id("t-slow")
                .with_capacity(100.0)
                .with_speed(Kmh::new(0.0))
                .with_warehouse_id("wh-1")
                .build(),
            TruckBuilder::default()
                .with_id("t-foreign")
                .with_capacity(100.0)
                .with_speed(Kmh::new(40.0))
                .with_warehouse_id("wh-2")
                .build(),
        ];

        let stores = vec![
            StoreBuilder::default()
                .with_id("s-ok")
                .with_position(1.0, 1.0)
                .with_demand(10.0)
                .build(),
            StoreBuilder::default()
                .with_id("s-zero")
                .with_position(1.0, 2.0)
                .with_demand(0.0)
                .build(),
        ];

        let problem = DispatchProblemBuilder::new(warehouse())
            .with_trucks(trucks)
            .with_stores(stores)
            .build();

        assert_eq!(problem.trucks().len(), 1);
        assert_eq!(problem.trucks()[0].id(), "t-ok");
        assert_eq!(problem.stores().len(), 1);
        assert_eq!(problem.exclusions().len(), 3);
    }

    #[test]
    fn malformed_flat_matrix_is_reported_and_recomputed() {
        let stores = vec![
            StoreBuilder::default()
                .with_id("s-1")
                .with_position(0.0, 4.0)
                .with_demand(10.0)
                .build(),
        ];

        // Two locations need four entries; three are supplied.
        let problem = DispatchProblemBuilder::new(warehouse())
            .with_stores(stores)
            .with_distance_method(DistanceMethod::Euclidean)
            .with_flat_matrix(vec![0.0, 1.0, 1.0])
            .build();

        assert_eq!(
            problem.exclusions(),
            &[ConfigurationError::MalformedDistanceMatrix {
                num_locations: 2,
                expected: 4,
                actual: 3,
            }]
        );
        assert_eq!(
            problem.distance_from_warehouse(StoreIdx::new(0)),
            Meters::new(4.0)
        );
    }

    #[test]
    fn store_locations_follow_the_warehouse() {
        let stores = vec![
            StoreBuilder::default()
                .with_id("s-1")
                .with_position(0.0, 3.0)
                .with_demand(10.0)
                .build(),
        ];

        let problem = DispatchProblemBuilder::new(warehouse())
            .with_stores(stores)
            .with_distance_method(DistanceMethod::Euclidean)
            .build();

        let store_id = StoreIdx::new(0);
        assert_eq!(problem.store_location_id(store_id).get(), 1);
        assert_eq!(
            problem.distance_from_warehouse(store_id),
            Meters::new(3.0)
        );
    }
}
