use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meridian_core::Location;
use meridian_routing::{Marker, markers};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct PostMarkersBody {
    start: Location,
    end: Location,
    #[serde(default)]
    waypoints: Vec<Location>,
    current: Option<Location>,
}

#[derive(Serialize)]
pub struct PostMarkersResponse {
    markers: Vec<Marker>,
}

impl IntoResponse for PostMarkersResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn post_markers_handler(Json(body): Json<PostMarkersBody>) -> PostMarkersResponse {
    PostMarkersResponse {
        markers: markers(
            &body.start,
            &body.end,
            &body.waypoints,
            body.current.as_ref(),
        ),
    }
}
