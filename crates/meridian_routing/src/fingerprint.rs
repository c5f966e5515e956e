use std::hash::{Hash, Hasher};

use fxhash::FxHasher64;
use meridian_core::{Coordinate, Location, RouteOptions};

/// Decimal places kept from each coordinate. 5 decimals is roughly 1 m.
pub const FINGERPRINT_PRECISION: i32 = 5;

fn hash_points<H, P>(points: &[P], hasher: &mut H)
where
    H: Hasher,
    for<'a> &'a P: Into<geo_types::Point>,
{
    points.len().hash(hasher);

    for point in points {
        let point: geo_types::Point = point.into();
        let rounded = Coordinate::from(point).rounded(FINGERPRINT_PRECISION);
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        hasher.write_u64((rounded.lat + 0.0).to_bits());
        hasher.write_u64((rounded.lng + 0.0).to_bits());
    }
}

fn hash_options<H: Hasher>(options: &RouteOptions, hasher: &mut H) {
    options.avoid_tolls.hash(hasher);
    options.avoid_highways.hash(hasher);
    options.avoid_ferries.hash(hasher);
    options.optimize_waypoints.hash(hasher);
}

/// Cache key for a route request, `<provider>:<16 hex digits>`.
///
/// Only what changes the result goes in: stops in visiting order at
/// [`FINGERPRINT_PRECISION`], option flags and the departure hour. Addresses
/// and place ids are ignored.
pub fn route_fingerprint(
    provider: &str,
    locations: &[Location],
    options: &RouteOptions,
    departure_hour: i8,
) -> String {
    let mut hasher = FxHasher64::default();

    provider.hash(&mut hasher);
    hash_points(locations, &mut hasher);
    hash_options(options, &mut hasher);
    departure_hour.hash(&mut hasher);

    format!("{}:{:016x}", provider, hasher.finish())
}
