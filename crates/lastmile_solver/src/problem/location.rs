use geo::{Distance, Euclidean, Haversine};

use crate::{define_index_newtype, problem::meters::Meters};

define_index_newtype!(LocationIdx, Location);

/// A planning location. Coordinates are (longitude, latitude) for the
/// haversine metric, or plain cartesian (x, y) for the euclidean one.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self {
            point: geo::Point::new(x, y),
        }
    }

    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self {
            point: geo::Point::new(lon, lat),
        }
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn euclidean_distance(&self, to: &Location) -> Meters {
        let euclidean = Euclidean;
        Meters::new(euclidean.distance(&self.point, &to.point))
    }

    pub fn haversine_distance(&self, to: &Location) -> Meters {
        let haversine = Haversine;
        Meters::new(haversine.distance(self.point, to.point))
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}
