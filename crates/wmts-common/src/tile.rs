//! WMTS tile references.
//!
//! A tile reference is the per-request input extracted upstream from a
//! RESTful WMTS URL such as
//! `/1.0.0/{layer}/default/{release}/{reference-system}/{zoom}/{row}/{col}.{ext}`.

use crate::TileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The input fields a tile reference is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileField {
    ZoomLevel,
    Column,
    Row,
    ReferenceSystem,
}

impl fmt::Display for TileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileField::ZoomLevel => "zoomlevel",
            TileField::Column => "col",
            TileField::Row => "row",
            TileField::ReferenceSystem => "reference-system",
        };
        f.write_str(name)
    }
}

/// A tile addressed by zoom level, column and row, plus the reference-system
/// token of the grid it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub zoom: i64,
    pub col: i64,
    pub row: i64,
    /// Raw token: a bare EPSG code (`"21781"`) or an alias (`"swissgrid"`).
    pub ref_system: String,
}

impl TileRef {
    pub fn new(zoom: i64, col: i64, row: i64, ref_system: impl Into<String>) -> Self {
        Self {
            zoom,
            col,
            row,
            ref_system: ref_system.into(),
        }
    }

    /// Build a tile reference from the textual fields of a request.
    pub fn parse(zoom: &str, col: &str, row: &str, ref_system: &str) -> Result<Self, TileError> {
        Ok(Self {
            zoom: parse_index(TileField::ZoomLevel, zoom)?,
            col: parse_index(TileField::Column, col)?,
            row: parse_index(TileField::Row, row)?,
            ref_system: ref_system.to_string(),
        })
    }
}

/// Parse an integer tile index.
///
/// Surrounding whitespace and a leading sign are accepted; anything else,
/// including an empty string or a decimal, is rejected.
pub fn parse_index(field: TileField, value: &str) -> Result<i64, TileError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TileError::NotAnInteger {
            field,
            value: value.to_string(),
        })
}
