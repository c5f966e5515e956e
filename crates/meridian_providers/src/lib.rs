pub mod config;
pub mod error;
mod http;
pub mod place_resolver;
pub mod road_snapper;
pub mod route_planner;
pub mod speed_limits;

#[cfg(test)]
pub(crate) mod test_server;

pub use config::{ConfigError, ProviderConfig};
pub use error::ProviderError;
pub use place_resolver::{
    AddressComponents, GeocodeResult, NominatimPlaceResolver, PlaceResolver, PlaceSuggestion,
};
pub use road_snapper::{HttpRoadSnapper, RoadSnapper, SnapToRoadsResult};
pub use route_planner::{OrsRoutePlanner, PlannedRoute, RouteLeg, RoutePlanner};
pub use speed_limits::{HttpSpeedLimitLookup, SpeedLimitLookup};
