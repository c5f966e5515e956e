use meridian_core::{BoundingBox, Coordinate, Provenance, SnappedPoint, SpeedLimit};
use meridian_providers::RouteLeg;
use serde::{Deserialize, Serialize};

use crate::traffic::TrafficInfo;

/// Aggregated route for one request.
///
/// `snapped_points`, `speed_limits` and `snap_provenance` are `None` on the
/// fallback path, where no snapping is attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_km: f64,
    pub base_duration_min: f64,
    pub traffic_duration_min: f64,
    pub geometry: Vec<Coordinate>,
    pub bounds: BoundingBox,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
    /// Visiting order of the request's waypoints, as indices into them.
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapped_points: Option<Vec<SnappedPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_limits: Option<Vec<SpeedLimit>>,
    pub traffic: TrafficInfo,
    pub provenance: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_provenance: Option<Provenance>,
}

impl RouteResult {
    pub fn traffic_delay_min(&self) -> f64 {
        self.traffic_duration_min - self.base_duration_min
    }

    /// True when every upstream contributed real data.
    pub fn is_complete(&self) -> bool {
        self.provenance == Provenance::Provider && self.snap_provenance == Some(Provenance::Provider)
    }
}
