use std::future::Future;

use meridian_core::{SegmentId, SpeedLimit, SpeedUnit};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::ProviderConfig,
    error::ProviderError,
    http::{build_client, join_pipe, read_json},
};

pub const SPEED_LIMITS_API_PATH: &str = "/v1/speedLimits";

/// Resolves road segment ids to legal speed limits.
///
/// Missing limits only degrade statistics, so implementations return an
/// empty list instead of failing.
pub trait SpeedLimitLookup: Send + Sync {
    fn limits(&self, segment_ids: &[SegmentId]) -> impl Future<Output = Vec<SpeedLimit>> + Send;
}

/// Provider ids in first-seen order. Synthetic ids cannot resolve upstream.
pub fn resolvable_ids(segment_ids: &[SegmentId]) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for id in segment_ids.iter().filter_map(SegmentId::as_provider) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeedLimitsResponse {
    #[serde(default)]
    speed_limits: Vec<WireSpeedLimit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSpeedLimit {
    place_id: String,
    speed_limit: f64,
    units: WireUnits,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
enum WireUnits {
    Kph,
    Mph,
}

impl From<WireUnits> for SpeedUnit {
    fn from(value: WireUnits) -> Self {
        match value {
            WireUnits::Kph => SpeedUnit::Kph,
            WireUnits::Mph => SpeedUnit::Mph,
        }
    }
}

pub struct HttpSpeedLimitLookup {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpSpeedLimitLookup {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.roads_url.clone(),
            api_key: config.roads_api_key.clone(),
        })
    }

    async fn request_limits(&self, ids: &[&str]) -> Result<Vec<SpeedLimit>, ProviderError> {
        let place_ids = join_pipe(ids);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, SPEED_LIMITS_API_PATH))
            .query(&[
                ("placeIds", place_ids.as_str()),
                ("units", "KPH"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: SpeedLimitsResponse = read_json(response).await?;

        Ok(body
            .speed_limits
            .into_iter()
            .map(|limit| SpeedLimit {
                segment_id: limit.place_id,
                limit: limit.speed_limit,
                unit: limit.units.into(),
            })
            .collect())
    }
}

impl SpeedLimitLookup for HttpSpeedLimitLookup {
    #[instrument(skip_all, fields(segments = segment_ids.len()))]
    async fn limits(&self, segment_ids: &[SegmentId]) -> Vec<SpeedLimit> {
        let ids = resolvable_ids(segment_ids);
        if ids.is_empty() {
            debug!("SpeedLimitLookup: no resolvable segment ids, skipping call");
            return Vec::new();
        }

        match self.request_limits(&ids).await {
            Ok(limits) => limits,
            Err(err) => {
                warn!("SpeedLimitLookup: upstream failed: {}", err);
                Vec::new()
            }
        }
    }
}
