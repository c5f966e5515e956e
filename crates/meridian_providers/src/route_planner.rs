use std::future::Future;

use meridian_core::{Coordinate, Location, RouteOptions, geodesy::path_length_km};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::ProviderConfig,
    error::ProviderError,
    http::{build_client, read_json},
};

pub const ORS_DIRECTIONS_API_PATH: &str = "/v2/directions/driving-car/geojson";

/// Distance and travel time between two consecutive stops.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub distance_km: f64,
    pub duration_min: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub distance_km: f64,
    pub duration_min: f64,
    pub geometry: Vec<Coordinate>,
    pub legs: Vec<RouteLeg>,
}

/// Computes a multi-stop driving route.
///
/// An error means the provider could not produce any route; callers decide
/// how to degrade.
pub trait RoutePlanner: Send + Sync {
    /// Short stable name, part of cache keys.
    fn name(&self) -> &str;

    fn plan(
        &self,
        locations: &[Location],
        options: &RouteOptions,
    ) -> impl Future<Output = Result<PlannedRoute, ProviderError>> + Send;
}

#[derive(Debug, Serialize)]
struct DirectionsRequestBody {
    coordinates: Vec<[f64; 2]>,
    instructions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<DirectionsOptions>,
}

#[derive(Debug, Serialize)]
struct DirectionsOptions {
    avoid_features: Vec<&'static str>,
}

impl DirectionsRequestBody {
    fn new(locations: &[Location], options: &RouteOptions) -> Self {
        let mut avoid_features = Vec::new();
        if options.avoid_tolls {
            avoid_features.push("tollways");
        }
        if options.avoid_highways {
            avoid_features.push("highways");
        }
        if options.avoid_ferries {
            avoid_features.push("ferries");
        }

        Self {
            coordinates: locations
                .iter()
                .map(|location| location.coordinate.to_lng_lat())
                .collect(),
            instructions: false,
            options: (!avoid_features.is_empty()).then_some(DirectionsOptions { avoid_features }),
        }
    }
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Deserialize)]
struct RouteFeature {
    geometry: LineStringGeometry,
    #[serde(default)]
    properties: RouteProperties,
}

#[derive(Deserialize)]
struct LineStringGeometry {
    /// `[lng, lat]` or `[lng, lat, elevation]`
    coordinates: Vec<Vec<f64>>,
}

#[derive(Deserialize, Default)]
struct RouteProperties {
    summary: Option<RouteSummary>,
    #[serde(default)]
    segments: Vec<RouteSegment>,
}

// ORS omits zero-valued fields.
#[derive(Deserialize)]
struct RouteSummary {
    distance: Option<f64>,
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct RouteSegment {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Deserialize)]
struct OrsErrorPayload {
    error: OrsErrorDetail,
}

#[derive(Deserialize)]
struct OrsErrorDetail {
    code: u32,
    message: String,
}

impl TryFrom<DirectionsResponse> for PlannedRoute {
    type Error = ProviderError;

    fn try_from(response: DirectionsResponse) -> Result<Self, Self::Error> {
        let feature = response
            .features
            .into_iter()
            .next()
            .ok_or(ProviderError::NoRoute)?;

        let geometry: Vec<Coordinate> = feature
            .geometry
            .coordinates
            .iter()
            .filter(|position| position.len() >= 2)
            .map(|position| Coordinate::from_lng_lat([position[0], position[1]]))
            .collect();

        if geometry.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "route has an empty geometry".to_owned(),
            ));
        }

        let legs: Vec<RouteLeg> = feature
            .properties
            .segments
            .iter()
            .map(|segment| RouteLeg {
                distance_km: segment.distance / 1000.0,
                duration_min: segment.duration / 60.0,
            })
            .collect();

        let summary = feature.properties.summary;

        let distance_km = summary
            .as_ref()
            .and_then(|summary| summary.distance)
            .map(|meters| meters / 1000.0)
            .unwrap_or_else(|| path_length_km(&geometry));

        let duration_min = summary
            .as_ref()
            .and_then(|summary| summary.duration)
            .map(|seconds| seconds / 60.0)
            .unwrap_or_else(|| legs.iter().map(|leg| leg.duration_min).sum());

        Ok(PlannedRoute {
            distance_km,
            duration_min,
            geometry,
            legs,
        })
    }
}

/// Driving directions from an OpenRouteService instance.
pub struct OrsRoutePlanner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OrsRoutePlanner {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.ors_url.clone(),
            api_key: config.ors_api_key.clone(),
        })
    }
}

impl RoutePlanner for OrsRoutePlanner {
    fn name(&self) -> &str {
        "ors"
    }

    #[instrument(skip_all, fields(stops = locations.len()))]
    async fn plan(
        &self,
        locations: &[Location],
        options: &RouteOptions,
    ) -> Result<PlannedRoute, ProviderError> {
        let body = DirectionsRequestBody::new(locations, options);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, ORS_DIRECTIONS_API_PATH))
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let directions: DirectionsResponse = read_json(response).await.map_err(|err| match err {
            ProviderError::Api { status, message } => {
                match serde_json::from_str::<OrsErrorPayload>(&message) {
                    Ok(payload) => ProviderError::Api {
                        status,
                        message: format!("{} (code {})", payload.error.message, payload.error.code),
                    },
                    Err(_) => ProviderError::Api { status, message },
                }
            }
            other => other,
        })?;

        let route = PlannedRoute::try_from(directions)?;

        debug!(
            "RoutePlanner: {:.2} km, {:.1} min, {} points",
            route.distance_km,
            route.duration_min,
            route.geometry.len()
        );

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;
    use crate::test_server::{UNREACHABLE_URL, serve, test_config};

    fn stops() -> Vec<Location> {
        vec![Location::new(23.8103, 90.4125), Location::new(23.7461, 90.3742)]
    }

    #[test]
    fn request_body_uses_lng_lat_and_avoid_features() {
        let options = RouteOptions {
            avoid_tolls: true,
            avoid_ferries: true,
            ..Default::default()
        };
        let body = serde_json::to_value(DirectionsRequestBody::new(&stops(), &options)).unwrap();

        assert_eq!(body["coordinates"], json!([[90.4125, 23.8103], [90.3742, 23.7461]]));
        assert_eq!(body["options"]["avoid_features"], json!(["tollways", "ferries"]));
    }

    #[test]
    fn request_body_omits_empty_options() {
        let body =
            serde_json::to_value(DirectionsRequestBody::new(&stops(), &RouteOptions::default()))
                .unwrap();
        assert!(body.get("options").is_none());
    }

    #[tokio::test]
    async fn decodes_geojson_route() {
        let router = Router::new().route(
            ORS_DIRECTIONS_API_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["coordinates"].as_array().map(Vec::len), Some(2));
                Json(json!({
                    "type": "FeatureCollection",
                    "features": [{
                        "type": "Feature",
                        "geometry": {
                            "type": "LineString",
                            "coordinates": [[90.4125, 23.8103], [90.39, 23.78, 12.0], [90.3742, 23.7461]]
                        },
                        "properties": {
                            "summary": { "distance": 8400.0, "duration": 1320.0 },
                            "segments": [{ "distance": 8400.0, "duration": 1320.0 }]
                        }
                    }]
                }))
            }),
        );
        let base = serve(router).await;
        let planner = OrsRoutePlanner::new(&test_config(&base)).unwrap();

        let route = planner.plan(&stops(), &RouteOptions::default()).await.unwrap();

        assert_eq!(route.distance_km, 8.4);
        assert_eq!(route.duration_min, 22.0);
        assert_eq!(route.geometry.len(), 3);
        assert_eq!(route.geometry[1], Coordinate::new(23.78, 90.39));
        assert_eq!(
            route.legs,
            vec![RouteLeg {
                distance_km: 8.4,
                duration_min: 22.0
            }]
        );
    }

    #[tokio::test]
    async fn missing_summary_is_computed_from_geometry_and_segments() {
        let router = Router::new().route(
            ORS_DIRECTIONS_API_PATH,
            post(|| async {
                Json(json!({
                    "features": [{
                        "geometry": { "coordinates": [[90.4125, 23.8103], [90.3742, 23.7461]] },
                        "properties": { "segments": [{ "duration": 600.0 }, { "duration": 300.0 }] }
                    }]
                }))
            }),
        );
        let base = serve(router).await;
        let planner = OrsRoutePlanner::new(&test_config(&base)).unwrap();

        let route = planner.plan(&stops(), &RouteOptions::default()).await.unwrap();

        assert!((route.distance_km - path_length_km(&route.geometry)).abs() < 1e-12);
        assert_eq!(route.duration_min, 15.0);
    }

    #[tokio::test]
    async fn zero_routes_is_an_error() {
        let router = Router::new().route(
            ORS_DIRECTIONS_API_PATH,
            post(|| async { Json(json!({ "type": "FeatureCollection", "features": [] })) }),
        );
        let base = serve(router).await;
        let planner = OrsRoutePlanner::new(&test_config(&base)).unwrap();

        let result = planner.plan(&stops(), &RouteOptions::default()).await;

        assert!(matches!(result, Err(ProviderError::NoRoute)));
    }

    #[tokio::test]
    async fn structured_api_errors_are_surfaced() {
        let router = Router::new().route(
            ORS_DIRECTIONS_API_PATH,
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": { "code": 2010, "message": "Could not find routable point" } })),
                )
            }),
        );
        let base = serve(router).await;
        let planner = OrsRoutePlanner::new(&test_config(&base)).unwrap();

        let result = planner.plan(&stops(), &RouteOptions::default()).await;

        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Could not find routable point (code 2010)");
            }
            _ => panic!("expected an API error"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_error() {
        let planner = OrsRoutePlanner::new(&test_config(UNREACHABLE_URL)).unwrap();
        let result = planner.plan(&stops(), &RouteOptions::default()).await;
        assert!(matches!(result, Err(ProviderError::Request(_))));
    }
}
