use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner
    pub min: Coordinate,
    /// North-east corner
    pub max: Coordinate,
}

impl BoundingBox {
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min.lat..=self.max.lat).contains(&point.lat)
            && (self.min.lng..=self.max.lng).contains(&point.lng)
    }
}
