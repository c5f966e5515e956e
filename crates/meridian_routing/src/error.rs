use meridian_core::GeoError;
use thiserror::Error;

/// Errors surfaced by [`crate::aggregator::RouteAggregator::compute_route`].
///
/// Upstream unavailability is never among them: it degrades the result and
/// shows up as its provenance instead.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Invalid route request: {0}")]
    InvalidRequest(String),

    #[error("Route request was cancelled")]
    Cancelled,

    #[error("Route request exceeded its deadline")]
    DeadlineExceeded,

    /// Only reachable through a bug: validated requests always have geometry.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeoError),
}

impl RoutingError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        RoutingError::InvalidRequest(message.into())
    }
}
