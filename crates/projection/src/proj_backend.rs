//! Reprojection through libproj.

use crate::Reprojector;
use proj::Proj;
use wmts_common::{CrsId, Point, ReprojectError};

/// Reprojector backed by the PROJ database.
///
/// A transformation object is created per call, so no PROJ context is shared
/// between threads. Output follows PROJ's visualization axis order
/// (longitude first for geographic CRSs).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjReprojector;

impl ProjReprojector {
    pub fn new() -> Self {
        Self
    }
}

impl Reprojector for ProjReprojector {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError> {
        if !point.is_finite() {
            return Err(ReprojectError::invalid_point(
                point.x,
                point.y,
                "non-finite coordinate",
            ));
        }

        let transform = Proj::new_known_crs(from.as_str(), to.as_str(), None)
            .map_err(|e| ReprojectError::UnknownCrs(format!("{} -> {}: {}", from, to, e)))?;

        let (x, y) = transform
            .convert((point.x, point.y))
            .map_err(|e| ReprojectError::Backend(e.to_string()))?;

        let out = Point::new(x, y);
        if !out.is_finite() {
            return Err(ReprojectError::invalid_point(x, y, "PROJ returned a non-finite point"));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lv03_to_wgs84() {
        let out = ProjReprojector
            .reproject(
                Point::new(707488.0, 109104.0),
                &CrsId::from("EPSG:21781"),
                &CrsId::from("EPSG:4326"),
            )
            .unwrap();
        assert!((out.x - 8.829295858079231).abs() < 1e-5);
        assert!((out.y - 46.12486163053951).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_code() {
        let err = ProjReprojector
            .reproject(
                Point::new(707488.0, 109104.0),
                &CrsId::from("EPSG:99999999"),
                &CrsId::from("EPSG:4326"),
            )
            .unwrap_err();
        assert!(matches!(err, ReprojectError::UnknownCrs(_)));
    }
}
