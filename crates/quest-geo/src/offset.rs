/// Length of one degree of latitude, in metres, measured at ~55.77 N.
///
/// Flat-earth approximation: only meaningful for radii of a few hundred
/// metres around that latitude. Do not use it as a distance function.
pub const METERS_PER_DEGREE_LAT: f64 = 111_337.6487;

/// Latitude one metre inside `radius` metres north of `latitude`.
pub fn latitude_inside(latitude: f64, radius: f64) -> f64 {
    latitude + (radius - 1.0) / METERS_PER_DEGREE_LAT
}

/// Latitude one metre outside `radius` metres north of `latitude`.
pub fn latitude_outside(latitude: f64, radius: f64) -> f64 {
    latitude + (radius + 1.0) / METERS_PER_DEGREE_LAT
}
