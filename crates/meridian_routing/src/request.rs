use meridian_core::{Location, RouteOptions};
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Ordered stops: start, zero or more waypoints, end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub locations: Vec<Location>,
    #[serde(default)]
    pub options: RouteOptions,
}

impl RouteRequest {
    pub fn new(start: Location, end: Location) -> Self {
        Self {
            locations: vec![start, end],
            options: RouteOptions::default(),
        }
    }

    pub fn from_parts(
        start: Location,
        waypoints: Vec<Location>,
        end: Location,
        options: RouteOptions,
    ) -> Self {
        let mut locations = Vec::with_capacity(waypoints.len() + 2);
        locations.push(start);
        locations.extend(waypoints);
        locations.push(end);

        Self { locations, options }
    }

    /// Inserts `waypoints` between the current waypoints and the end.
    pub fn with_waypoints(mut self, waypoints: impl IntoIterator<Item = Location>) -> Self {
        let end = self.locations.pop();
        self.locations.extend(waypoints);
        self.locations.extend(end);
        self
    }

    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn start(&self) -> Option<&Location> {
        self.locations.first()
    }

    pub fn end(&self) -> Option<&Location> {
        if self.locations.len() < 2 {
            return None;
        }
        self.locations.last()
    }

    pub fn waypoints(&self) -> &[Location] {
        match self.locations.len() {
            0..=2 => &[],
            len => &self.locations[1..len - 1],
        }
    }

    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.locations.len() < 2 {
            return Err(RoutingError::invalid_request(format!(
                "at least 2 locations are required, got {}",
                self.locations.len()
            )));
        }

        if let Some((index, location)) = self
            .locations
            .iter()
            .enumerate()
            .find(|(_, location)| !location.coordinate.is_valid())
        {
            return Err(RoutingError::invalid_request(format!(
                "location {} has an invalid coordinate ({})",
                index, location.coordinate
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoints_sit_between_start_and_end() {
        let request = RouteRequest::new(Location::new(1.0, 1.0), Location::new(4.0, 4.0))
            .with_waypoints([Location::new(2.0, 2.0), Location::new(3.0, 3.0)]);

        assert_eq!(request.start(), Some(&Location::new(1.0, 1.0)));
        assert_eq!(request.end(), Some(&Location::new(4.0, 4.0)));
        assert_eq!(
            request.waypoints(),
            &[Location::new(2.0, 2.0), Location::new(3.0, 3.0)]
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn single_location_is_invalid() {
        let request = RouteRequest {
            locations: vec![Location::new(1.0, 1.0)],
            options: RouteOptions::default(),
        };

        assert!(matches!(
            request.validate(),
            Err(RoutingError::InvalidRequest(_))
        ));
        assert_eq!(request.end(), None);
        assert!(request.waypoints().is_empty());
    }

    #[test]
    fn out_of_range_coordinate_is_invalid() {
        let request = RouteRequest::new(Location::new(91.0, 0.0), Location::new(0.0, 0.0));
        assert!(matches!(
            request.validate(),
            Err(RoutingError::InvalidRequest(_))
        ));
    }

    #[test]
    fn options_default_when_missing() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"locations":[{"lat":23.81,"lng":90.41},{"lat":23.74,"lng":90.37}]}"#,
        )
        .unwrap();

        assert_eq!(request.options, RouteOptions::default());
        assert!(request.validate().is_ok());
    }
}
