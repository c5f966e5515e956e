use meridian_core::{
    GeoError, Location, Provenance,
    geodesy::{bounding_box, haversine_km},
};
use meridian_providers::RouteLeg;

use crate::{result::RouteResult, traffic::{CongestionLevel, TrafficInfo}};

/// Straight-line estimate used when no route provider answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackModel {
    pub minutes_per_km: f64,
    /// Added once per intermediate stop.
    pub waypoint_penalty_min: f64,
    pub traffic_multiplier: f64,
}

impl Default for FallbackModel {
    fn default() -> Self {
        Self {
            minutes_per_km: 2.0,
            waypoint_penalty_min: 5.0,
            traffic_multiplier: 1.2,
        }
    }
}

impl FallbackModel {
    pub fn traffic(&self) -> TrafficInfo {
        TrafficInfo {
            level: CongestionLevel::Moderate,
            multiplier: self.traffic_multiplier,
        }
    }

    /// Builds a result over the stops themselves. `locations` are in visiting
    /// order; the error only arises for an empty stop list.
    pub fn route(
        &self,
        locations: &[Location],
        waypoint_order: Vec<usize>,
    ) -> Result<RouteResult, GeoError> {
        let geometry: Vec<_> = locations.iter().map(|location| location.coordinate).collect();
        let bounds = bounding_box(&geometry)?;

        let waypoint_count = locations.len().saturating_sub(2);
        let last_leg = geometry.len().saturating_sub(2);

        let legs: Vec<RouteLeg> = geometry
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let distance_km = haversine_km(&pair[0], &pair[1]);
                let penalty = if index < last_leg {
                    self.waypoint_penalty_min
                } else {
                    0.0
                };
                RouteLeg {
                    distance_km,
                    duration_min: distance_km * self.minutes_per_km + penalty,
                }
            })
            .collect();

        let distance_km: f64 = legs.iter().map(|leg| leg.distance_km).sum();
        let base_duration_min =
            distance_km * self.minutes_per_km + waypoint_count as f64 * self.waypoint_penalty_min;
        let traffic = self.traffic();

        Ok(RouteResult {
            distance_km,
            base_duration_min,
            traffic_duration_min: traffic.apply(base_duration_min),
            geometry,
            bounds,
            legs,
            waypoint_order,
            snapped_points: None,
            speed_limits: None,
            traffic,
            provenance: Provenance::Fallback,
            snap_provenance: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use meridian_core::geodesy::path_length_km;

    use super::*;

    #[test]
    fn direct_route_uses_straight_line_distance() {
        let stops = vec![Location::new(23.8103, 90.4125), Location::new(23.7461, 90.3742)];

        let route = FallbackModel::default().route(&stops, Vec::new()).unwrap();

        let expected = haversine_km(&stops[0].coordinate, &stops[1].coordinate);
        assert!((route.distance_km - expected).abs() < 1e-9);
        assert!((route.base_duration_min - expected * 2.0).abs() < 1e-9);
        assert!((route.traffic_duration_min - route.base_duration_min * 1.2).abs() < 1e-9);
        assert_eq!(route.traffic.level, CongestionLevel::Moderate);
        assert_eq!(route.provenance, Provenance::Fallback);
        assert_eq!(route.geometry.len(), 2);
        assert!(route.snapped_points.is_none());
    }

    #[test]
    fn waypoints_add_penalty_to_their_legs() {
        let stops = vec![
            Location::new(0.0, 0.0),
            Location::new(0.0, 0.1),
            Location::new(0.0, 0.2),
            Location::new(0.0, 0.3),
        ];

        let route = FallbackModel::default().route(&stops, vec![0, 1]).unwrap();

        let distance = path_length_km(&route.geometry);
        assert!((route.distance_km - distance).abs() < 1e-9);
        assert!((route.base_duration_min - (distance * 2.0 + 10.0)).abs() < 1e-9);
        assert_eq!(route.legs.len(), 3);
        assert!((route.legs[0].duration_min - (route.legs[0].distance_km * 2.0 + 5.0)).abs() < 1e-9);
        assert!((route.legs[2].duration_min - route.legs[2].distance_km * 2.0).abs() < 1e-9);

        let leg_total: f64 = route.legs.iter().map(|leg| leg.duration_min).sum();
        assert!((leg_total - route.base_duration_min).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_all_stops() {
        let stops = vec![
            Location::new(23.70, 90.40),
            Location::new(23.90, 90.30),
            Location::new(23.80, 90.50),
        ];

        let route = FallbackModel::default().route(&stops, vec![0]).unwrap();

        for stop in &stops {
            assert!(route.bounds.contains(&stop.coordinate));
        }
    }

    #[test]
    fn empty_stop_list_is_rejected() {
        assert_eq!(
            FallbackModel::default().route(&[], Vec::new()),
            Err(GeoError::EmptyInput)
        );
    }
}
