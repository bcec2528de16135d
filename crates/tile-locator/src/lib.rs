//! WMTS tile locator.
//!
//! Turns the zoom level, column, row and reference system of a WMTS tile
//! request into the coordinates of the tile, in the grid's native CRS and in
//! a configured target CRS, and writes them into the request's log record.
//!
//! The work is split in two steps:
//! - the [grid resolver](resolver) maps tile indices to a native point;
//! - the [CRS normalizer](normalizer) decides whether the point needs
//!   reprojecting and delegates to a [`Reprojector`].
//!
//! [`TileLocator`] composes both; [`RecordEnricher`] applies a locator to a
//! JSON record using configurable field references.

pub mod config;
pub mod field_ref;
pub mod locator;
pub mod normalizer;
pub mod record;
pub mod resolver;

pub use config::{ConfigError, LocatorConfig};
pub use field_ref::{FieldRef, FieldRefError};
pub use locator::TileLocator;
pub use normalizer::{input_crs, normalize};
pub use record::{Enrichment, RecordEnricher, RecordFields};
pub use resolver::resolve;

pub use projection::Reprojector;
pub use wmts_common::{
    CrsId, EpsgMapping, GridConfig, LocateError, NativePoint, OutputPoint, Point, Resolution,
    TileError, TileRef,
};
