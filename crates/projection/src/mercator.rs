//! Spherical Web Mercator (EPSG:3857, also published as EPSG:900913).

use std::f64::consts::PI;

/// Sphere radius used by Web Mercator (WGS84 semi-major axis), in metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which the square Web Mercator world is clipped, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Half the width of the projected world, in metres.
pub const MAX_EXTENT: f64 = 20_037_508.342_789_244;

/// Project WGS84 (lon, lat) degrees to Web Mercator metres.
///
/// Callers must keep `lat` within `±MAX_LATITUDE`.
pub fn lonlat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Unproject Web Mercator metres to WGS84 (lon, lat) degrees.
pub fn mercator_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}
