use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// A stop on a route: a coordinate plus whatever place metadata the caller
/// or a geocoder attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    pub coordinate: Coordinate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            coordinate: Coordinate::new(lat, lng),
            address: None,
            place_id: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            address: None,
            place_id: None,
        }
    }
}

impl From<&Location> for geo_types::Point {
    fn from(value: &Location) -> Self {
        geo_types::Point::new(value.coordinate.lng, value.coordinate.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flat_coordinate() {
        let location: Location =
            serde_json::from_str(r#"{"lat": 23.8103, "lng": 90.4125, "address": "Dhaka"}"#)
                .unwrap();

        assert_eq!(location.coordinate, Coordinate::new(23.8103, 90.4125));
        assert_eq!(location.address.as_deref(), Some("Dhaka"));
        assert_eq!(location.place_id, None);
    }

    #[test]
    fn converts_to_geo_point_as_lng_lat() {
        let point: geo_types::Point = (&Location::new(10.0, 20.0)).into();
        assert_eq!(point.x(), 20.0);
        assert_eq!(point.y(), 10.0);
    }
}
