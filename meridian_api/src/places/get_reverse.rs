use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meridian_core::Coordinate;
use meridian_providers::{GeocodeResult, PlaceResolver};
use meridian_routing::RequestContext;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct ReverseQuery {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
pub struct GetReverseResponse(GeocodeResult);

impl IntoResponse for GetReverseResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn get_reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReverseQuery>,
) -> Result<GetReverseResponse, ApiError> {
    let coordinate = Coordinate::new(query.lat, query.lng);
    if !coordinate.is_valid() {
        return Err(ApiError::BadRequest(format!(
            "invalid coordinate ({coordinate})"
        )));
    }

    let context = RequestContext::background().with_timeout(state.config.request_timeout);
    let result = context
        .guard(state.places.reverse_geocode(coordinate))
        .await?;

    Ok(GetReverseResponse(result))
}
