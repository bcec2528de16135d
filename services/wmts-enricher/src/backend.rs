//! Reprojector selection.

use clap::ValueEnum;
use projection::{BuiltinReprojector, Reprojector};
use std::sync::Arc;
use thiserror::Error;

/// Which reprojection backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReprojectorKind {
    /// Built-in formulas for WGS84, LV03, LV95 and Web Mercator. Accurate
    /// near Switzerland only; points far outside fail to reproject, so use
    /// `proj` for GeoTools-compatible output.
    #[default]
    Builtin,
    /// libproj, when compiled with the `proj` feature.
    Proj,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("the '{0:?}' reprojector is not available in this build (enable the `proj` feature)")]
    Unavailable(ReprojectorKind),
}

/// Build the reprojector selected on the command line.
pub fn build_reprojector(kind: ReprojectorKind) -> Result<Arc<dyn Reprojector>, BackendError> {
    match kind {
        ReprojectorKind::Builtin => Ok(Arc::new(BuiltinReprojector)),
        #[cfg(feature = "proj")]
        ReprojectorKind::Proj => Ok(Arc::new(projection::ProjReprojector::new())),
        #[cfg(not(feature = "proj"))]
        ReprojectorKind::Proj => Err(BackendError::Unavailable(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmts_common::{CrsId, Point};

    #[test]
    fn test_builtin_help_points_to_proj() {
        let value = ReprojectorKind::Builtin.to_possible_value().unwrap();
        let help = value.get_help().unwrap().to_string();
        assert!(help.contains("Switzerland"), "{}", help);
        assert!(help.contains("`proj`"), "{}", help);
    }

    #[test]
    fn test_builtin_rejects_far_out_swissgrid_tile() {
        // zoom 9, col 714, row 371 on the default Swiss grid
        let reprojector = build_reprojector(ReprojectorKind::Builtin).unwrap();
        let result = reprojector.reproject(
            Point::new(320516000.0, -166082000.0),
            &CrsId::from("epsg:21781"),
            &CrsId::from("epsg:4326"),
        );
        assert!(result.is_err(), "{:?}", result);
    }

    #[test]
    fn test_builtin_is_default() {
        assert_eq!(ReprojectorKind::default(), ReprojectorKind::Builtin);
        let reprojector = build_reprojector(ReprojectorKind::Builtin).unwrap();
        let out = reprojector
            .reproject(
                Point::new(600000.0, 200000.0),
                &CrsId::from("epsg:21781"),
                &CrsId::from("epsg:4326"),
            )
            .unwrap();
        assert!((out.x - 7.4386).abs() < 1e-3);
        assert!((out.y - 46.9511).abs() < 1e-3);
    }

    #[cfg(not(feature = "proj"))]
    #[test]
    fn test_proj_unavailable_without_feature() {
        let err = build_reprojector(ReprojectorKind::Proj).err().unwrap();
        assert!(err.to_string().contains("proj"));
    }
}
