use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geojson::{Feature, GeoJson, Geometry, Value::LineString};
use meridian_core::{Coordinate, Location, RouteOptions};
use meridian_routing::{RequestContext, RouteRequest, RouteResult};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct RouteRequestBody {
    start: Location,
    end: Location,
    #[serde(default)]
    waypoints: Vec<Location>,
    #[serde(default)]
    options: RouteOptions,
}

impl From<RouteRequestBody> for RouteRequest {
    fn from(body: RouteRequestBody) -> Self {
        RouteRequest::from_parts(body.start, body.waypoints, body.end, body.options)
    }
}

#[derive(Serialize)]
pub struct RouteResponse {
    route: RouteResult,
    path: GeoJson,
}

impl IntoResponse for RouteResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

fn path_feature(geometry: &[Coordinate]) -> GeoJson {
    let points: Vec<Vec<f64>> = geometry
        .iter()
        .map(|point| point.to_lng_lat().to_vec())
        .collect();

    GeoJson::Feature(Feature {
        bbox: None,
        properties: None,
        foreign_members: None,
        id: None,
        geometry: Some(Geometry::new(LineString(points))),
    })
}

pub async fn post_route_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RouteRequestBody>,
) -> Result<RouteResponse, ApiError> {
    let request = RouteRequest::from(body);
    let context = RequestContext::background().with_timeout(state.config.request_timeout);

    let route = state.aggregator.compute_route(&request, &context).await?;

    Ok(RouteResponse {
        path: path_feature(&route.geometry),
        route,
    })
}
