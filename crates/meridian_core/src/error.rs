use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeoError {
    #[error("Geometry computation requires at least one point")]
    EmptyInput,
}
