pub mod get_reverse;
pub mod get_search;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn places_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(get_search::get_search_handler))
        .route("/reverse", get(get_reverse::get_reverse_handler))
}
