//! Error types for tile location.

use crate::tile::TileField;
use thiserror::Error;

/// Message written to a record when its tile parameters cannot be used.
pub const INVALID_TILE_MESSAGE: &str = "Bad parameter received from upstream filter";

/// Message written to a record when the native point cannot be reprojected.
pub const REPROJECTION_FAILED_MESSAGE: &str = "Unable to reproject tile coordinates";

/// Why a tile reference was rejected before any coordinate math.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    #[error("missing field '{field}'")]
    Missing { field: TileField },

    #[error("field '{field}' is not an integer: {value:?}")]
    NotAnInteger { field: TileField, value: String },

    #[error("field '{field}' has an unusable value: {value}")]
    InvalidValue { field: TileField, value: String },

    #[error("zoom level {zoom} is outside the {levels} levels of the grid")]
    ZoomOutOfRange { zoom: i64, levels: usize },

    #[error("tile coordinates do not fit the native grid")]
    CoordinateOverflow,
}

/// Failure reported by a reprojection backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReprojectError {
    #[error("unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("no transformation from {from} to {to}")]
    UnsupportedTransform { from: String, to: String },

    #[error("invalid point ({x}, {y}): {reason}")]
    InvalidPoint { x: f64, y: f64, reason: String },

    #[error("projection backend error: {0}")]
    Backend(String),
}

impl ReprojectError {
    pub fn invalid_point(x: f64, y: f64, reason: impl Into<String>) -> Self {
        ReprojectError::InvalidPoint {
            x,
            y,
            reason: reason.into(),
        }
    }
}

/// Terminal outcome of a failed tile location.
///
/// The two variants are mutually exclusive: `InvalidTile` is raised before
/// coordinate math, `ReprojectionFailed` during or after it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocateError {
    #[error("Bad parameter received from upstream filter: {0}")]
    InvalidTile(#[from] TileError),

    #[error("Unable to reproject tile coordinates: {0}")]
    ReprojectionFailed(#[from] ReprojectError),
}

impl LocateError {
    /// The fixed message written to the record's `errmsg` field.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocateError::InvalidTile(_) => INVALID_TILE_MESSAGE,
            LocateError::ReprojectionFailed(_) => REPROJECTION_FAILED_MESSAGE,
        }
    }

    /// Stable short code, used for counters and log fields.
    pub fn error_kind(&self) -> &'static str {
        match self {
            LocateError::InvalidTile(_) => "invalid_tile",
            LocateError::ReprojectionFailed(_) => "reprojection_failed",
        }
    }
}

/// Invalid tile grid parameters, detected at configuration time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridConfigError {
    #[error("resolutions must contain at least one zoom level")]
    EmptyResolutions,

    #[error("resolution for zoom level {zoom} must be finite and positive, got {value}")]
    InvalidResolution { zoom: usize, value: f64 },

    #[error("tile size must be non-zero, got {width}x{height}")]
    InvalidTileSize { width: u32, height: u32 },

    #[error("grid origin must be finite, got ({x}, {y})")]
    InvalidOrigin { x: f64, y: f64 },
}
