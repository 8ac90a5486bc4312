use chrono::{DateTime, Utc};

use quest_types::{GeoPoint, Position};

/// Build a position record stamped with the current time.
pub fn build_position(lon: f64, lat: f64, user_name: &str, name: &str) -> Position {
    make(lon, lat, user_name, name, Utc::now())
}

/// Build a position record with a caller-chosen timestamp.
///
/// Fixture helper: lets tests place records on either side of the TTL
/// without sleeping.
#[cfg(any(test, feature = "test-support"))]
pub fn build_position_at(
    lon: f64,
    lat: f64,
    user_name: &str,
    name: &str,
    at: DateTime<Utc>,
) -> Position {
    make(lon, lat, user_name, name, at)
}

fn make(lon: f64, lat: f64, user_name: &str, name: &str, at: DateTime<Utc>) -> Position {
    Position {
        user_name: user_name.to_string(),
        name: name.to_string(),
        last_updated: at,
        location: GeoPoint::new(lon, lat),
    }
}
