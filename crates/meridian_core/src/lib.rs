pub mod bounding_box;
pub mod coordinate;
pub mod error;
pub mod geodesy;
pub mod location;
pub mod provenance;
pub mod route_options;
pub mod segment;

pub use bounding_box::BoundingBox;
pub use coordinate::Coordinate;
pub use error::GeoError;
pub use location::Location;
pub use provenance::Provenance;
pub use route_options::RouteOptions;
pub use segment::{SegmentId, SnappedPoint, SpeedLimit, SpeedUnit};
