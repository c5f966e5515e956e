pub mod post_markers;
pub mod post_route;
pub mod post_statistics;

use std::sync::Arc;

use axum::{Router, routing::post};

use crate::state::AppState;

pub fn route_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(post_route::post_route_handler))
        .route("/statistics", post(post_statistics::post_statistics_handler))
        .route("/markers", post(post_markers::post_markers_handler))
}
