use anyhow::Result;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

use quest_types::GeoPoint;

/// Sphere radius used for distance queries, in metres. Same value
/// 2dsphere indexes use, so radii mean the same thing as they did there.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Great-circle distance in metres (haversine).
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Latitude band, in degrees, that can hold any point within `meters` of
/// a centre. Great-circle distance is never shorter than the meridian
/// distance, so this band is exact as a prefilter.
pub fn latitude_band_deg(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_M).to_degrees()
}

/// Register `geo_distance(lon1, lat1, lon2, lat2)` on a connection.
/// Must be called on every connection that runs proximity queries.
pub fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "geo_distance",
        4,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let a = GeoPoint::new(ctx.get::<f64>(0)?, ctx.get::<f64>(1)?);
            let b = GeoPoint::new(ctx.get::<f64>(2)?, ctx.get::<f64>(3)?);
            Ok(distance_m(a, b))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_same_point() {
        let p = GeoPoint::new(12.48, 55.77);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111_318.8).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let at_equator = distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        let at_55 = distance_m(GeoPoint::new(0.0, 55.0), GeoPoint::new(1.0, 55.0));
        assert!(at_55 < at_equator * 0.6);
    }

    #[test]
    fn sql_function_matches_rust() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();
        let sql: f64 = conn
            .query_row("SELECT geo_distance(12.48, 55.77, 12.49, 55.77)", [], |r| r.get(0))
            .unwrap();
        let rust = distance_m(GeoPoint::new(12.48, 55.77), GeoPoint::new(12.49, 55.77));
        assert!((sql - rust).abs() < 1e-9);
    }
}
