//! Coordinate reprojection for located tiles.
//!
//! The built-in transforms are implemented from scratch and cover the grids
//! a WMTS log usually references: WGS84, the Swiss LV03/LV95 grids and
//! spherical Web Mercator. Enable the `proj` feature for exact
//! transformations between any CRS known to libproj.

pub mod geographic;
pub mod mercator;
#[cfg(feature = "proj")]
pub mod proj_backend;
pub mod swiss;
pub mod transform;

#[cfg(feature = "proj")]
pub use proj_backend::ProjReprojector;
pub use transform::{BuiltinReprojector, KnownCrs, Reprojector};
pub use wmts_common::{CrsId, Point, ReprojectError};
