use std::{sync::Arc, time::Duration};

use clap::Args;
use comfy_table::Table;
use jiff::Timestamp;
use meridian_core::{Coordinate, Location, RouteOptions};
use meridian_providers::{HttpRoadSnapper, HttpSpeedLimitLookup, OrsRoutePlanner, ProviderConfig};
use meridian_routing::{
    AggregatorConfig, CacheConfig, ResultCache, RouteAggregator, RouteRequest, markers, statistics,
};
use tracing::info;

use crate::{context::interactive_context, parsers};

#[derive(Args)]
pub struct RouteArgs {
    /// Start as lat,lng
    #[arg(long, value_parser = parsers::parse_coordinate)]
    from: Coordinate,

    /// Destination as lat,lng
    #[arg(long, value_parser = parsers::parse_coordinate)]
    to: Coordinate,

    /// Intermediate stop as lat,lng, repeatable
    #[arg(long, value_parser = parsers::parse_coordinate)]
    via: Vec<Coordinate>,

    #[arg(long)]
    avoid_tolls: bool,

    #[arg(long)]
    avoid_highways: bool,

    #[arg(long)]
    avoid_ferries: bool,

    /// Reorder intermediate stops by proximity
    #[arg(long)]
    optimize: bool,

    /// Departure instant (e.g., "2025-03-10T08:00:00Z"), defaults to now
    #[arg(long)]
    depart: Option<Timestamp>,

    #[arg(short, long, value_parser = parsers::parse_timeout, default_value = "30s")]
    timeout: Duration,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

impl RouteArgs {
    fn request(&self) -> RouteRequest {
        RouteRequest::from_parts(
            Location::from(self.from),
            self.via.iter().copied().map(Location::from).collect(),
            Location::from(self.to),
            RouteOptions {
                avoid_tolls: self.avoid_tolls,
                avoid_highways: self.avoid_highways,
                avoid_ferries: self.avoid_ferries,
                optimize_waypoints: self.optimize,
                departure_time: self.depart,
            },
        )
    }
}

pub async fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let providers = ProviderConfig::from_env()?;
    let aggregator = RouteAggregator::new(
        OrsRoutePlanner::new(&providers)?,
        HttpRoadSnapper::new(&providers)?,
        HttpSpeedLimitLookup::new(&providers)?,
        Arc::new(ResultCache::new(CacheConfig::from_env()?)),
        AggregatorConfig::from_env()?,
    );

    let request = args.request();
    info!("Routing {} stops", request.locations.len());

    let context = interactive_context(args.timeout);
    let route = aggregator.compute_route(&request, &context).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
        return Ok(());
    }

    let stats = statistics(&route);

    let mut summary = Table::new();
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec!["Distance".to_owned(), format!("{:.2} km", stats.distance_km)]);
    summary.add_row(vec![
        "Duration".to_owned(),
        format!("{:.1} min", stats.base_duration_min),
    ]);
    summary.add_row(vec![
        "With traffic".to_owned(),
        format!(
            "{:.1} min ({:?}, +{:.1} min)",
            stats.traffic_duration_min, route.traffic.level, stats.traffic_delay_min
        ),
    ]);
    summary.add_row(vec![
        "Average speed".to_owned(),
        format!("{:.1} km/h", stats.average_speed_kph),
    ]);
    summary.add_row(vec![
        "Speed limits".to_owned(),
        format!(
            "{:.0}-{:.0} km/h ({} segments)",
            stats.min_speed_limit_kph, stats.max_speed_limit_kph, stats.speed_limit_count
        ),
    ]);
    summary.add_row(vec!["Source".to_owned(), format!("{:?}", stats.provenance)]);
    println!("{summary}");

    let (Some(start), Some(end)) = (request.start(), request.end()) else {
        return Ok(());
    };
    let ordered: Vec<Location> = route
        .waypoint_order
        .iter()
        .filter_map(|&index| request.waypoints().get(index).cloned())
        .collect();

    let mut stops = Table::new();
    stops.set_header(vec!["", "Stop", "Position"]);
    for marker in markers(start, end, &ordered, None) {
        stops.add_row(vec![
            marker.label,
            marker.title,
            marker.position.to_string(),
        ]);
    }
    println!("{stops}");

    Ok(())
}
