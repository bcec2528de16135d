//! WGS84 geographic coordinates (EPSG:4326), longitude first.

use wmts_common::{Point, ReprojectError};

/// Check that a point is a usable longitude/latitude pair.
pub fn validate_lonlat(lon: f64, lat: f64) -> Result<Point, ReprojectError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(ReprojectError::invalid_point(lon, lat, "non-finite coordinate"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ReprojectError::invalid_point(lon, lat, "longitude outside [-180, 180]"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ReprojectError::invalid_point(lon, lat, "latitude outside [-90, 90]"));
    }
    Ok(Point::new(lon, lat))
}
