use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use jiff::{Timestamp, civil::date, tz::TimeZone};
use meridian_core::{
    Coordinate, Location, Provenance, RouteOptions, SegmentId, SnappedPoint, SpeedLimit, SpeedUnit,
};
use meridian_providers::{
    PlannedRoute, ProviderError, RoadSnapper, RoutePlanner, SnapToRoadsResult, SpeedLimitLookup,
};
use parking_lot::Mutex;

/// 2025-03-10 at `hour`:00 UTC.
pub fn departure_at_hour(hour: i8) -> Timestamp {
    date(2025, 3, 10)
        .at(hour, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap()
        .timestamp()
}

#[derive(Clone)]
enum PlannerBehaviour {
    Succeed(PlannedRoute),
    Fail,
    Hang,
}

/// Clones share counters, so a test keeps one copy to inspect after handing
/// another to the aggregator.
#[derive(Clone)]
pub struct MockPlanner {
    behaviour: PlannerBehaviour,
    pub calls: Arc<AtomicUsize>,
    pub received: Arc<Mutex<Vec<Vec<Location>>>>,
}

impl MockPlanner {
    fn with_behaviour(behaviour: PlannerBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::default(),
            received: Arc::default(),
        }
    }

    pub fn succeeding(route: PlannedRoute) -> Self {
        Self::with_behaviour(PlannerBehaviour::Succeed(route))
    }

    pub fn failing() -> Self {
        Self::with_behaviour(PlannerBehaviour::Fail)
    }

    pub fn hanging() -> Self {
        Self::with_behaviour(PlannerBehaviour::Hang)
    }
}

impl RoutePlanner for MockPlanner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn plan(
        &self,
        locations: &[Location],
        _options: &RouteOptions,
    ) -> Result<PlannedRoute, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().push(locations.to_vec());

        match &self.behaviour {
            PlannerBehaviour::Succeed(route) => Ok(route.clone()),
            PlannerBehaviour::Fail => Err(ProviderError::NoRoute),
            PlannerBehaviour::Hang => std::future::pending().await,
        }
    }
}

/// Snaps every point onto itself with id `seg-<index>`, or falls back.
#[derive(Clone, Default)]
pub struct MockSnapper {
    fail: bool,
    pub calls: Arc<AtomicUsize>,
    pub received: Arc<Mutex<Vec<Vec<Coordinate>>>>,
}

impl MockSnapper {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl RoadSnapper for MockSnapper {
    async fn snap(&self, points: &[Coordinate]) -> SnapToRoadsResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().push(points.to_vec());

        if self.fail {
            return SnapToRoadsResult::fallback(points);
        }

        SnapToRoadsResult {
            points: points
                .iter()
                .enumerate()
                .map(|(index, point)| SnappedPoint {
                    location: *point,
                    original_index: Some(index),
                    segment_id: SegmentId::Provider(format!("seg-{index}")),
                })
                .collect(),
            provenance: Provenance::Provider,
        }
    }
}

/// Answers 50 km/h for every provider id it is asked about.
#[derive(Clone, Default)]
pub struct MockSpeedLimits {
    pub received: Arc<Mutex<Vec<Vec<SegmentId>>>>,
}

impl SpeedLimitLookup for MockSpeedLimits {
    async fn limits(&self, segment_ids: &[SegmentId]) -> Vec<SpeedLimit> {
        self.received.lock().push(segment_ids.to_vec());

        segment_ids
            .iter()
            .filter_map(SegmentId::as_provider)
            .map(|id| SpeedLimit {
                segment_id: id.to_owned(),
                limit: 50.0,
                unit: SpeedUnit::Kph,
            })
            .collect()
    }
}
