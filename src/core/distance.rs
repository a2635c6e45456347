use crate::core::constants::EARTH_RADIUS_METERS;

/// Great-circle distance in meters between two lon/lat points given in degrees.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
///
/// # Example
/// ```
/// use geoiters_rs::haversine;
///
/// let d = haversine(-74.0, 40.7, -73.9, 40.7);
/// assert!(d > 8000.0 && d < 9000.0);
/// ```
pub fn haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let dlon = (lon2 - lon1).to_radians();
    let dlat = (lat2 - lat1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
