use crate::{bounding_box::BoundingBox, coordinate::Coordinate, error::GeoError};

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

pub fn path_length_km(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(&pair[0], &pair[1]))
        .sum()
}

pub fn bounding_box(points: &[Coordinate]) -> Result<BoundingBox, GeoError> {
    let first = points.first().ok_or(GeoError::EmptyInput)?;

    let mut min = *first;
    let mut max = *first;

    for point in &points[1..] {
        min.lat = min.lat.min(point.lat);
        min.lng = min.lng.min(point.lng);
        max.lat = max.lat.max(point.lat);
        max.lng = max.lng.max(point.lng);
    }

    Ok(BoundingBox { min, max })
}

/// Evenly strided subsample of at most `max_count` points.
///
/// The first and last points are always kept and the relative order is
/// preserved. When the input already fits, it is returned unchanged.
pub fn decimate(points: &[Coordinate], max_count: usize) -> Vec<Coordinate> {
    if points.len() <= max_count {
        return points.to_vec();
    }

    match max_count {
        0 => Vec::new(),
        1 => vec![points[0]],
        _ => {
            let last = points.len() - 1;
            (0..max_count)
                .map(|i| points[i * last / (max_count - 1)])
                .collect()
        }
    }
}
