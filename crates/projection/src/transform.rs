//! The reprojection capability and the built-in implementation.

use crate::geographic::validate_lonlat;
use crate::{mercator, swiss};
use std::sync::Arc;
use wmts_common::{CrsId, Point, ReprojectError};

/// Transforms a point from one CRS to another.
///
/// Implementations must be safe to share between threads; a locator calls
/// `reproject` once per record and records are independent.
pub trait Reprojector: Send + Sync {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError>;
}

impl<R: Reprojector + ?Sized> Reprojector for Arc<R> {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError> {
        (**self).reproject(point, from, to)
    }
}

impl<R: Reprojector + ?Sized> Reprojector for &R {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError> {
        (**self).reproject(point, from, to)
    }
}

/// CRSs handled by [`BuiltinReprojector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCrs {
    /// EPSG:4326, longitude/latitude in degrees
    Wgs84,
    /// EPSG:21781, CH1903 / LV03
    Lv03,
    /// EPSG:2056, CH1903+ / LV95
    Lv95,
    /// EPSG:3857 (and the legacy EPSG:900913)
    WebMercator,
}

impl KnownCrs {
    /// Resolve an `epsg:<code>` identifier (authority case-insensitive).
    pub fn from_crs_id(crs: &CrsId) -> Result<Self, ReprojectError> {
        match crs.epsg_code() {
            Some(4326) => Ok(KnownCrs::Wgs84),
            Some(21781) => Ok(KnownCrs::Lv03),
            Some(2056) => Ok(KnownCrs::Lv95),
            Some(3857) | Some(900913) => Ok(KnownCrs::WebMercator),
            _ => Err(ReprojectError::UnknownCrs(crs.to_string())),
        }
    }

    pub fn epsg_code(&self) -> u32 {
        match self {
            KnownCrs::Wgs84 => 4326,
            KnownCrs::Lv03 => 21781,
            KnownCrs::Lv95 => 2056,
            KnownCrs::WebMercator => 3857,
        }
    }

    fn inverse(self, point: Point) -> Result<Point, ReprojectError> {
        let (lon, lat) = match self {
            KnownCrs::Wgs84 => (point.x, point.y),
            KnownCrs::Lv03 => swiss::lv03_to_wgs84(point.x, point.y),
            KnownCrs::Lv95 => swiss::lv95_to_wgs84(point.x, point.y),
            KnownCrs::WebMercator => mercator::mercator_to_lonlat(point.x, point.y),
        };
        validate_lonlat(lon, lat)
    }

    fn forward(self, lonlat: Point) -> Result<Point, ReprojectError> {
        let (x, y) = match self {
            KnownCrs::Wgs84 => (lonlat.x, lonlat.y),
            KnownCrs::Lv03 => swiss::wgs84_to_lv03(lonlat.x, lonlat.y),
            KnownCrs::Lv95 => swiss::wgs84_to_lv95(lonlat.x, lonlat.y),
            KnownCrs::WebMercator => {
                if lonlat.y.abs() > mercator::MAX_LATITUDE {
                    return Err(ReprojectError::invalid_point(
                        lonlat.x,
                        lonlat.y,
                        "latitude outside the Web Mercator range",
                    ));
                }
                mercator::lonlat_to_mercator(lonlat.x, lonlat.y)
            }
        };
        Ok(Point::new(x, y))
    }
}

/// Dependency-free reprojector routing every transformation through WGS84.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReprojector;

impl BuiltinReprojector {
    pub fn new() -> Self {
        Self
    }
}

impl Reprojector for BuiltinReprojector {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError> {
        let source = KnownCrs::from_crs_id(from)?;
        let target = KnownCrs::from_crs_id(to)?;

        if !point.is_finite() {
            return Err(ReprojectError::invalid_point(
                point.x,
                point.y,
                "non-finite coordinate",
            ));
        }
        if source == target {
            return Ok(point);
        }

        let lonlat = source.inverse(point)?;
        target.forward(lonlat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crs(s: &str) -> CrsId {
        CrsId::from(s)
    }

    #[test]
    fn test_known_crs() {
        assert_eq!(KnownCrs::from_crs_id(&crs("epsg:21781")), Ok(KnownCrs::Lv03));
        assert_eq!(KnownCrs::from_crs_id(&crs("EPSG:4326")), Ok(KnownCrs::Wgs84));
        assert_eq!(
            KnownCrs::from_crs_id(&crs("epsg:900913")),
            Ok(KnownCrs::WebMercator)
        );
        assert_eq!(
            KnownCrs::from_crs_id(&crs("epsg:99999999")),
            Err(ReprojectError::UnknownCrs("epsg:99999999".to_string()))
        );
        assert!(KnownCrs::from_crs_id(&crs("epsg:swissgrid")).is_err());
    }

    #[test]
    fn test_lv03_to_wgs84() {
        let out = BuiltinReprojector
            .reproject(Point::new(707488.0, 109104.0), &crs("epsg:21781"), &crs("epsg:4326"))
            .unwrap();
        assert!((out.x - 8.829295858079231).abs() < 1e-4);
        assert!((out.y - 46.12486163053951).abs() < 1e-4);
    }

    #[test]
    fn test_same_crs_in_other_case_is_identity() {
        let p = Point::new(8.5, 46.9);
        let out = BuiltinReprojector
            .reproject(p, &crs("EPSG:4326"), &crs("epsg:4326"))
            .unwrap();
        assert_eq!(out, p);
    }

    #[test]
    fn test_point_outside_swiss_formulas_fails() {
        let err = BuiltinReprojector
            .reproject(
                Point::new(320516000.0, -166082000.0),
                &crs("epsg:21781"),
                &crs("epsg:4326"),
            )
            .unwrap_err();
        assert!(matches!(err, ReprojectError::InvalidPoint { .. }));
    }

    #[test]
    fn test_polar_point_to_mercator_fails() {
        let err = BuiltinReprojector
            .reproject(Point::new(0.0, 89.0), &crs("epsg:4326"), &crs("epsg:3857"))
            .unwrap_err();
        assert!(matches!(err, ReprojectError::InvalidPoint { .. }));
    }

    #[test]
    fn test_non_finite_input_fails() {
        let err = BuiltinReprojector
            .reproject(Point::new(f64::NAN, 0.0), &crs("epsg:4326"), &crs("epsg:4326"))
            .unwrap_err();
        assert!(matches!(err, ReprojectError::InvalidPoint { .. }));
    }

    #[test]
    fn test_trait_object_through_arc() {
        let reprojector: Arc<dyn Reprojector> = Arc::new(BuiltinReprojector::new());
        let out = reprojector
            .reproject(Point::new(0.0, 0.0), &crs("epsg:4326"), &crs("epsg:3857"))
            .unwrap();
        assert!(out.x.abs() < 1e-9 && out.y.abs() < 1e-9);
    }
}
