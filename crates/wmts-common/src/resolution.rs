//! Result of locating a tile.

use crate::{CrsId, NativePoint, Point};
use serde::Serialize;
use std::fmt;

/// The output point of a resolution.
///
/// When no reprojection was needed the native integer point is carried over
/// unchanged, so downstream consumers see the same values as `input_*`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputPoint {
    Native(NativePoint),
    Projected(Point),
}

impl OutputPoint {
    pub fn as_point(&self) -> Point {
        match *self {
            OutputPoint::Native(p) => p.into(),
            OutputPoint::Projected(p) => p,
        }
    }

    pub fn is_reprojected(&self) -> bool {
        matches!(self, OutputPoint::Projected(_))
    }
}

impl fmt::Display for OutputPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputPoint::Native(p) => fmt::Display::fmt(p, f),
            OutputPoint::Projected(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// Coordinates of a tile in its native CRS and in the target CRS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub input_epsg: CrsId,
    pub input: NativePoint,
    pub output_epsg: CrsId,
    pub output: OutputPoint,
}

impl Resolution {
    /// True when the output was produced by a reprojection call.
    pub fn reprojected(&self) -> bool {
        self.output.is_reprojected()
    }
}
