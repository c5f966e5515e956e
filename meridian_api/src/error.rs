use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meridian_routing::RoutingError;
use tracing::error;

pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
    GatewayTimeout(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<RoutingError> for ApiError {
    fn from(error: RoutingError) -> Self {
        match error {
            RoutingError::InvalidRequest(_) => ApiError::BadRequest(error.to_string()),
            RoutingError::Cancelled | RoutingError::DeadlineExceeded => {
                ApiError::GatewayTimeout(error.to_string())
            }
            RoutingError::Geometry(_) => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                error!("{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::GatewayTimeout(message) => {
                (StatusCode::GATEWAY_TIMEOUT, message).into_response()
            }
        }
    }
}
