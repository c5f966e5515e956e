use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meridian_providers::{PlaceResolver, PlaceSuggestion};
use meridian_routing::RequestContext;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 20;

#[derive(Deserialize)]
pub struct SearchQuery {
    q: String,
    country: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
pub struct GetSearchResponse {
    places: Vec<PlaceSuggestion>,
}

impl IntoResponse for GetSearchResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn get_search_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<GetSearchResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let context = RequestContext::background().with_timeout(state.config.request_timeout);

    let places = context
        .guard(
            state
                .places
                .search(&query.q, query.country.as_deref(), limit),
        )
        .await?;

    Ok(GetSearchResponse { places })
}
