use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::coordinate::Coordinate;

pub const SYNTHETIC_SEGMENT_PREFIX: &str = "fallback_";

/// Identifier of the road segment a point was snapped onto.
///
/// Synthetic identifiers are minted locally when snapping failed; they can
/// never be resolved upstream. On the wire both variants are plain strings,
/// synthetic ones rendered as `fallback_<index>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum SegmentId {
    Provider(String),
    Synthetic(usize),
}

impl SegmentId {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, SegmentId::Synthetic(_))
    }

    pub fn as_provider(&self) -> Option<&str> {
        match self {
            SegmentId::Provider(id) => Some(id),
            SegmentId::Synthetic(_) => None,
        }
    }
}

impl Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentId::Provider(id) => write!(f, "{id}"),
            SegmentId::Synthetic(index) => write!(f, "{SYNTHETIC_SEGMENT_PREFIX}{index}"),
        }
    }
}

impl FromStr for SegmentId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let synthetic = s
            .strip_prefix(SYNTHETIC_SEGMENT_PREFIX)
            .and_then(|index| index.parse::<usize>().ok());

        Ok(match synthetic {
            Some(index) => SegmentId::Synthetic(index),
            None => SegmentId::Provider(s.to_owned()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnappedPoint {
    pub location: Coordinate,

    /// Index of the input point this snapped point corresponds to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_index: Option<usize>,

    pub segment_id: SegmentId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    Kph,
    Mph,
}

const KPH_PER_MPH: f64 = 1.609_344;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimit {
    pub segment_id: String,
    pub limit: f64,
    pub unit: SpeedUnit,
}

impl SpeedLimit {
    pub fn kph(&self) -> f64 {
        match self.unit {
            SpeedUnit::Kph => self.limit,
            SpeedUnit::Mph => self.limit * KPH_PER_MPH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_ids_round_trip_through_strings() {
        assert_eq!(SegmentId::Synthetic(3).to_string(), "fallback_3");
        assert_eq!(
            "fallback_3".parse::<SegmentId>().unwrap(),
            SegmentId::Synthetic(3)
        );
    }

    #[test]
    fn prefix_without_index_is_a_provider_id() {
        let id: SegmentId = "fallback_road".parse().unwrap();
        assert_eq!(id, SegmentId::Provider("fallback_road".to_owned()));
        assert!(!id.is_synthetic());
    }

    #[test]
    fn serializes_as_plain_string() {
        let point = SnappedPoint {
            location: Coordinate::new(1.0, 2.0),
            original_index: None,
            segment_id: SegmentId::Synthetic(0),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["segment_id"], "fallback_0");

        let back: SnappedPoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn converts_mph_to_kph() {
        let limit = SpeedLimit {
            segment_id: "a".into(),
            limit: 50.0,
            unit: SpeedUnit::Mph,
        };
        assert!((limit.kph() - 80.4672).abs() < 1e-9);
    }
}
