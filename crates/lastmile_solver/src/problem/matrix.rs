use crate::{
    error::ConfigurationError,
    problem::{
        distance_method::DistanceMethod,
        location::{Location, LocationIdx},
        meters::Meters,
    },
};

/// Flat location-to-location distance matrix.
///
/// Index for a pair of locations: `from * num_locations + to`.
#[derive(Debug)]
pub struct DistanceMatrix {
    distances: Vec<f64>,
    num_locations: usize,
}

impl DistanceMatrix {
    pub fn compute(locations: &[Location], method: DistanceMethod) -> Self {
        let num_locations = locations.len();
        let mut distances = vec![0.0; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                let distance = match method {
                    DistanceMethod::Haversine => from.haversine_distance(to),
                    DistanceMethod::Euclidean => from.euclidean_distance(to),
                };
                distances[i * num_locations + j] = distance.value();
            }
        }

        DistanceMatrix {
            distances,
            num_locations,
        }
    }

    /// Externally supplied metric, flat row-major layout. The entry count
    /// must be square in the location count.
    pub fn from_flat(
        distances: Vec<f64>,
        num_locations: usize,
    ) -> Result<Self, ConfigurationError> {
        let expected = num_locations * num_locations;
        if distances.len() != expected {
            return Err(ConfigurationError::MalformedDistanceMatrix {
                num_locations,
                expected,
                actual: distances.len(),
            });
        }

        Ok(DistanceMatrix {
            distances,
            num_locations,
        })
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline(always)]
    pub fn distance(&self, from: LocationIdx, to: LocationIdx) -> Meters {
        if from == to {
            return Meters::ZERO;
        }

        Meters::new(self.distances[self.index(from, to)])
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.num_locations {
            for j in 0..self.num_locations {
                if self.distances[i * self.num_locations + j]
                    != self.distances[j * self.num_locations + i]
                {
                    return false;
                }
            }
        }
        true
    }
}
