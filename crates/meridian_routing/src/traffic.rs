use jiff::Zoned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Moderate,
    High,
    Severe,
}

/// Estimated congestion at departure and the factor applied to base duration.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficInfo {
    pub level: CongestionLevel,
    pub multiplier: f64,
}

impl TrafficInfo {
    pub const LOW: TrafficInfo = TrafficInfo {
        level: CongestionLevel::Low,
        multiplier: 1.0,
    };

    pub const MODERATE: TrafficInfo = TrafficInfo {
        level: CongestionLevel::Moderate,
        multiplier: 1.2,
    };

    pub const HIGH: TrafficInfo = TrafficInfo {
        level: CongestionLevel::High,
        multiplier: 1.5,
    };

    pub const SEVERE: TrafficInfo = TrafficInfo {
        level: CongestionLevel::Severe,
        multiplier: 1.8,
    };

    pub fn apply(&self, base_duration_min: f64) -> f64 {
        base_duration_min * self.multiplier
    }
}

/// Time-of-day traffic estimate, read in the zone carried by `departure`.
pub fn estimate(departure: &Zoned) -> TrafficInfo {
    estimate_hour(departure.hour())
}

pub fn estimate_hour(hour: i8) -> TrafficInfo {
    match hour {
        7..=9 => TrafficInfo::HIGH,
        16..=18 => TrafficInfo::SEVERE,
        12..=14 => TrafficInfo::MODERATE,
        _ => TrafficInfo::LOW,
    }
}

#[cfg(test)]
mod tests {
    use jiff::{
        civil::date,
        tz::{TimeZone, offset},
    };

    use super::*;

    #[test]
    fn rush_hour_bands() {
        assert_eq!(estimate_hour(8), TrafficInfo::HIGH);
        assert_eq!(estimate_hour(17), TrafficInfo::SEVERE);
        assert_eq!(estimate_hour(13), TrafficInfo::MODERATE);
        assert_eq!(estimate_hour(22), TrafficInfo::LOW);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(estimate_hour(7).level, CongestionLevel::High);
        assert_eq!(estimate_hour(9).level, CongestionLevel::High);
        assert_eq!(estimate_hour(10).level, CongestionLevel::Low);
        assert_eq!(estimate_hour(16).level, CongestionLevel::Severe);
        assert_eq!(estimate_hour(18).level, CongestionLevel::Severe);
        assert_eq!(estimate_hour(19).level, CongestionLevel::Low);
        assert_eq!(estimate_hour(0).level, CongestionLevel::Low);
    }

    #[test]
    fn multiplier_is_never_below_one() {
        for hour in 0..24 {
            assert!(estimate_hour(hour).multiplier >= 1.0);
        }
    }

    #[test]
    fn hour_is_read_in_departure_zone() {
        // 02:30 UTC is 08:30 at UTC+6.
        let departure = date(2025, 3, 10)
            .at(2, 30, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .with_time_zone(TimeZone::fixed(offset(6)));

        assert_eq!(estimate(&departure), TrafficInfo::HIGH);
    }

    #[test]
    fn example_commute() {
        assert_eq!(TrafficInfo::HIGH.apply(22.0), 33.0);
    }
}
