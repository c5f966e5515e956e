pub mod aggregator;
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod fallback;
pub mod fingerprint;
pub mod request;
pub mod result;
pub mod traffic;
pub mod views;
pub mod waypoint_order;

#[cfg(test)]
pub(crate) mod test_utils;

pub use aggregator::RouteAggregator;
pub use cache::{CacheConfig, ResultCache};
pub use config::{AggregatorConfig, ConfigError};
pub use context::{CancelHandle, RequestContext};
pub use error::RoutingError;
pub use fallback::FallbackModel;
pub use request::RouteRequest;
pub use result::RouteResult;
pub use traffic::{CongestionLevel, TrafficInfo};
pub use views::{Marker, MarkerKind, RouteStatistics, markers, statistics};
