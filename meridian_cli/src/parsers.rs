use std::time::Duration;

use jiff::{SignedDuration, Span, SpanRelativeTo};
use meridian_core::Coordinate;

/// Parses a request timeout: bare seconds (`45`), a friendly duration
/// (`30s`, `1m 30s`) or ISO 8601 (`PT1M`). Must be positive.
pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    let input = input.trim();

    if let Ok(seconds) = input.parse::<u64>() {
        return positive(Duration::from_secs(seconds), input);
    }

    let signed = input.parse::<SignedDuration>().or_else(|_| {
        input
            .parse::<Span>()
            .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    });

    match signed {
        Ok(duration) if duration.is_negative() => {
            Err(format!("Timeout must not be negative: {input}"))
        }
        Ok(duration) => positive(duration.unsigned_abs(), input),
        Err(_) => Err(format!("Invalid timeout: {input}")),
    }
}

fn positive(duration: Duration, input: &str) -> Result<Duration, String> {
    if duration.is_zero() {
        return Err(format!("Timeout must be greater than zero: {input}"));
    }
    Ok(duration)
}

/// Parses `lat,lng`, e.g. `23.8103,90.4125`.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, String> {
    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| String::from("Expected lat,lng"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("Invalid latitude: {lat}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("Invalid longitude: {lng}"))?;

    let coordinate = Coordinate::new(lat, lng);
    if !coordinate.is_valid() {
        return Err(format!("Coordinate out of range: {input}"));
    }

    Ok(coordinate)
}
