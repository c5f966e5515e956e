use std::future::Future;

use meridian_core::{Coordinate, Provenance, SegmentId, SnappedPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    config::ProviderConfig,
    error::ProviderError,
    http::{build_client, join_pipe, read_json},
};

pub const SNAP_TO_ROADS_API_PATH: &str = "/v1/snapToRoads";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapToRoadsResult {
    pub points: Vec<SnappedPoint>,
    pub provenance: Provenance,
}

impl SnapToRoadsResult {
    /// Echoes every input point back as its own snapped location with a
    /// synthetic segment id.
    pub fn fallback(points: &[Coordinate]) -> Self {
        Self {
            points: points
                .iter()
                .enumerate()
                .map(|(index, point)| SnappedPoint {
                    location: *point,
                    original_index: Some(index),
                    segment_id: SegmentId::Synthetic(index),
                })
                .collect(),
            provenance: Provenance::Fallback,
        }
    }

    /// Provider segment ids in first-seen order, without duplicates.
    pub fn provider_segment_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for point in &self.points {
            if let Some(id) = point.segment_id.as_provider() {
                if !ids.iter().any(|seen| seen == id) {
                    ids.push(id.to_owned());
                }
            }
        }
        ids
    }
}

/// Maps raw GPS points onto the road network.
///
/// Implementations are total: upstream failures come back as a
/// [`Provenance::Fallback`] result, never as an error.
pub trait RoadSnapper: Send + Sync {
    fn snap(&self, points: &[Coordinate]) -> impl Future<Output = SnapToRoadsResult> + Send;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapToRoadsResponse {
    #[serde(default)]
    snapped_points: Vec<WireSnappedPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSnappedPoint {
    location: WireLatLng,
    original_index: Option<usize>,
    place_id: Option<String>,
}

#[derive(Deserialize)]
struct WireLatLng {
    latitude: f64,
    longitude: f64,
}

pub struct HttpRoadSnapper {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpRoadSnapper {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.roads_url.clone(),
            api_key: config.roads_api_key.clone(),
        })
    }

    async fn request_snap(&self, points: &[Coordinate]) -> Result<Vec<SnappedPoint>, ProviderError> {
        let path = join_pipe(points.iter().map(|p| format!("{},{}", p.lat, p.lng)));

        let response = self
            .client
            .get(format!("{}{}", self.base_url, SNAP_TO_ROADS_API_PATH))
            .query(&[
                ("path", path.as_str()),
                ("interpolate", "false"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: SnapToRoadsResponse = read_json(response).await?;

        if body.snapped_points.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "no points could be snapped".to_owned(),
            ));
        }

        let points = body
            .snapped_points
            .into_iter()
            .enumerate()
            .map(|(index, point)| SnappedPoint {
                location: Coordinate::new(point.location.latitude, point.location.longitude),
                original_index: point.original_index,
                segment_id: point
                    .place_id
                    .map(SegmentId::Provider)
                    .unwrap_or(SegmentId::Synthetic(index)),
            })
            .collect();

        Ok(points)
    }
}

impl RoadSnapper for HttpRoadSnapper {
    #[instrument(skip_all, fields(points = points.len()))]
    async fn snap(&self, points: &[Coordinate]) -> SnapToRoadsResult {
        if points.is_empty() {
            return SnapToRoadsResult::fallback(points);
        }

        match self.request_snap(points).await {
            Ok(snapped) => {
                debug!("RoadSnapper: snapped {} points", snapped.len());
                SnapToRoadsResult {
                    points: snapped,
                    provenance: Provenance::Provider,
                }
            }
            Err(err) => {
                warn!("RoadSnapper: falling back to raw points: {}", err);
                SnapToRoadsResult::fallback(points)
            }
        }
    }
}
