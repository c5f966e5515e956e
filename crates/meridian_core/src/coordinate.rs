use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geodesy::haversine_km;

/// A WGS84 position. `lat` in [-90, 90], `lng` in [-180, 180].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// GeoJSON and most routing engines order pairs as `[lng, lat]`.
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lng: pair[0],
        }
    }

    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn haversine_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self, other)
    }

    /// Rounds both axes to `decimals` places, used to build stable cache keys.
    pub fn rounded(&self, decimals: i32) -> Self {
        let factor = 10f64.powi(decimals);
        Self {
            lat: (self.lat * factor).round() / factor,
            lng: (self.lng * factor).round() / factor,
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl From<geo_types::Point> for Coordinate {
    fn from(value: geo_types::Point) -> Self {
        Self {
            lat: value.y(),
            lng: value.x(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_ranges() {
        assert!(Coordinate::new(23.8103, 90.4125).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn rounds_to_precision() {
        let c = Coordinate::new(23.810_304_9, 90.412_496_1).rounded(5);
        assert_eq!(c, Coordinate::new(23.8103, 90.4125));
    }

    #[test]
    fn reads_geo_point_as_lng_lat() {
        let coordinate = Coordinate::from(geo_types::Point::new(20.0, 10.0));
        assert_eq!(coordinate, Coordinate::new(10.0, 20.0));
    }
}
