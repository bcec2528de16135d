//! Common types shared by the WMTS tile locator crates.

pub mod crs;
pub mod error;
pub mod grid;
pub mod point;
pub mod resolution;
pub mod tile;

pub use crs::{CrsId, EpsgMapping, RefSystem};
pub use error::{
    GridConfigError, LocateError, ReprojectError, TileError, INVALID_TILE_MESSAGE,
    REPROJECTION_FAILED_MESSAGE,
};
pub use grid::GridConfig;
pub use point::{NativePoint, Point};
pub use resolution::{OutputPoint, Resolution};
pub use tile::{TileField, TileRef};
