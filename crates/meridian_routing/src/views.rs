use meridian_core::{Coordinate, Location, Provenance, SpeedLimit};
use serde::{Deserialize, Serialize};

use crate::result::RouteResult;

pub const DEFAULT_MAX_SPEED_LIMIT_KPH: f64 = 60.0;
pub const DEFAULT_MIN_SPEED_LIMIT_KPH: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStatistics {
    pub distance_km: f64,
    pub base_duration_min: f64,
    pub traffic_duration_min: f64,
    pub traffic_delay_min: f64,
    pub average_speed_kph: f64,
    pub max_speed_limit_kph: f64,
    pub min_speed_limit_kph: f64,
    pub speed_limit_count: usize,
    pub provenance: Provenance,
}

/// Summary figures for display. Speed limit bounds fall back to urban
/// defaults when the route carries none.
pub fn statistics(route: &RouteResult) -> RouteStatistics {
    let limits: &[SpeedLimit] = route.speed_limits.as_deref().unwrap_or_default();

    let (max_speed_limit_kph, min_speed_limit_kph) = if limits.is_empty() {
        (DEFAULT_MAX_SPEED_LIMIT_KPH, DEFAULT_MIN_SPEED_LIMIT_KPH)
    } else {
        limits
            .iter()
            .map(SpeedLimit::kph)
            .fold((f64::MIN, f64::MAX), |(max, min), kph| {
                (max.max(kph), min.min(kph))
            })
    };

    let average_speed_kph = if route.base_duration_min > 0.0 {
        route.distance_km / route.base_duration_min * 60.0
    } else {
        0.0
    };

    RouteStatistics {
        distance_km: route.distance_km,
        base_duration_min: route.base_duration_min,
        traffic_duration_min: route.traffic_duration_min,
        traffic_delay_min: route.traffic_delay_min(),
        average_speed_kph,
        max_speed_limit_kph,
        min_speed_limit_kph,
        speed_limit_count: limits.len(),
        provenance: route.provenance,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    End,
    Waypoint,
    Current,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub label: String,
    pub title: String,
}

impl Marker {
    fn new(kind: MarkerKind, location: &Location, label: String, default_title: String) -> Self {
        Self {
            kind,
            position: location.coordinate,
            label,
            title: location.address.clone().unwrap_or(default_title),
        }
    }
}

/// Map markers in display order: start, end, waypoints, then the current
/// position if known.
pub fn markers(
    start: &Location,
    end: &Location,
    waypoints: &[Location],
    current: Option<&Location>,
) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(waypoints.len() + 3);

    markers.push(Marker::new(
        MarkerKind::Start,
        start,
        "A".to_owned(),
        "Start".to_owned(),
    ));
    markers.push(Marker::new(
        MarkerKind::End,
        end,
        "B".to_owned(),
        "Destination".to_owned(),
    ));

    markers.extend(waypoints.iter().enumerate().map(|(index, waypoint)| {
        let number = index + 1;
        Marker::new(
            MarkerKind::Waypoint,
            waypoint,
            number.to_string(),
            format!("Stop {number}"),
        )
    }));

    if let Some(current) = current {
        markers.push(Marker::new(
            MarkerKind::Current,
            current,
            "•".to_owned(),
            "Current location".to_owned(),
        ));
    }

    markers
}
