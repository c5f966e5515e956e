use std::sync::Arc;

use jiff::{Timestamp, Zoned};
use meridian_core::{
    Location, Provenance, RouteOptions, SegmentId,
    geodesy::{bounding_box, decimate},
};
use meridian_providers::{
    PlannedRoute, ProviderError, RoadSnapper, RoutePlanner, SpeedLimitLookup,
};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::{
    cache::ResultCache,
    config::AggregatorConfig,
    context::RequestContext,
    error::RoutingError,
    fingerprint::route_fingerprint,
    request::RouteRequest,
    result::RouteResult,
    traffic,
    waypoint_order::{apply_order, nearest_neighbour_order},
};

/// Combines route planning, road snapping, speed limits and traffic into one
/// [`RouteResult`], degrading to a straight-line estimate when the planner
/// is unavailable.
pub struct RouteAggregator<P, S, L> {
    planner: P,
    snapper: S,
    speed_limits: L,
    cache: Arc<ResultCache<RouteResult>>,
    config: AggregatorConfig,
}

impl<P, S, L> RouteAggregator<P, S, L>
where
    P: RoutePlanner,
    S: RoadSnapper,
    L: SpeedLimitLookup,
{
    pub fn new(
        planner: P,
        snapper: S,
        speed_limits: L,
        cache: Arc<ResultCache<RouteResult>>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            planner,
            snapper,
            speed_limits,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &Arc<ResultCache<RouteResult>> {
        &self.cache
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Computes the route for `request`.
    ///
    /// Fails only for an invalid request or when `context` is cancelled or
    /// expires. Planner failures produce a fallback result instead.
    #[instrument(skip_all, fields(stops = request.locations.len()))]
    pub async fn compute_route(
        &self,
        request: &RouteRequest,
        context: &RequestContext,
    ) -> Result<RouteResult, RoutingError> {
        request.validate()?;

        if context.is_cancelled() {
            return Err(RoutingError::Cancelled);
        }

        let (locations, waypoint_order) = self.visiting_order(request);
        let departure = self.departure(&request.options);

        let key = route_fingerprint(
            self.planner.name(),
            &locations,
            &request.options,
            departure.hour(),
        );

        if let Some(cached) = self.cache.get(&key) {
            debug!("RouteAggregator: cache hit for {}", key);
            return Ok(cached);
        }

        let start = Instant::now();

        let planned = context
            .guard(self.planner.plan(&locations, &request.options))
            .await?
            .and_then(|route| {
                if route.geometry.is_empty() {
                    Err(ProviderError::InvalidResponse(
                        "planner returned an empty geometry".to_owned(),
                    ))
                } else {
                    Ok(route)
                }
            });

        match planned {
            Ok(route) => {
                let result = self
                    .enrich(route, waypoint_order, &departure, context)
                    .await?;

                self.cache.put(key.clone(), result.clone());

                info!(
                    "RouteAggregator: {} -> {:.2} km, {:.1} min ({:?} traffic) in {:?}",
                    key,
                    result.distance_km,
                    result.traffic_duration_min,
                    result.traffic.level,
                    start.elapsed()
                );

                Ok(result)
            }
            Err(err) => {
                warn!(
                    "RouteAggregator: planner {} failed, using fallback: {}",
                    self.planner.name(),
                    err
                );

                let result = self.config.fallback.route(&locations, waypoint_order)?;

                info!(
                    "RouteAggregator: {} -> fallback {:.2} km, {:.1} min in {:?}",
                    key,
                    result.distance_km,
                    result.traffic_duration_min,
                    start.elapsed()
                );

                Ok(result)
            }
        }
    }

    /// Stops in visiting order and the waypoint permutation that produced it.
    fn visiting_order(&self, request: &RouteRequest) -> (Vec<Location>, Vec<usize>) {
        let waypoints = request.waypoints();

        match request.start() {
            Some(start) if request.options.optimize_waypoints && waypoints.len() >= 2 => {
                let order = nearest_neighbour_order(&start.coordinate, waypoints);
                (apply_order(&request.locations, &order), order)
            }
            _ => (request.locations.clone(), (0..waypoints.len()).collect()),
        }
    }

    fn departure(&self, options: &RouteOptions) -> Zoned {
        options
            .departure_time
            .unwrap_or_else(Timestamp::now)
            .to_zoned(self.config.time_zone.clone())
    }

    async fn enrich(
        &self,
        route: PlannedRoute,
        waypoint_order: Vec<usize>,
        departure: &Zoned,
        context: &RequestContext,
    ) -> Result<RouteResult, RoutingError> {
        let sample = decimate(&route.geometry, self.config.snap_sample_size);

        let snapped = context.guard(self.snapper.snap(&sample)).await?;

        let segment_ids: Vec<SegmentId> = snapped
            .points
            .iter()
            .map(|point| point.segment_id.clone())
            .filter(|id| !id.is_synthetic())
            .collect();

        let speed_limits = context
            .guard(self.speed_limits.limits(&segment_ids))
            .await?;

        let traffic = traffic::estimate(departure);
        let bounds = bounding_box(&route.geometry)?;

        debug!(
            "RouteAggregator: snapped {} of {} points ({:?}), {} speed limits",
            snapped.points.len(),
            route.geometry.len(),
            snapped.provenance,
            speed_limits.len()
        );

        Ok(RouteResult {
            distance_km: route.distance_km,
            base_duration_min: route.duration_min,
            traffic_duration_min: traffic.apply(route.duration_min),
            geometry: route.geometry,
            bounds,
            legs: route.legs,
            waypoint_order,
            snapped_points: Some(snapped.points),
            speed_limits: Some(speed_limits),
            traffic,
            provenance: Provenance::Provider,
            snap_provenance: Some(snapped.provenance),
        })
    }
}
