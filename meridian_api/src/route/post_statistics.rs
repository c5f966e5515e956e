use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meridian_routing::{RouteResult, RouteStatistics, statistics};
use serde::Serialize;

#[derive(Serialize)]
pub struct PostStatisticsResponse(RouteStatistics);

impl IntoResponse for PostStatisticsResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn post_statistics_handler(Json(route): Json<RouteResult>) -> PostStatisticsResponse {
    PostStatisticsResponse(statistics(&route))
}
