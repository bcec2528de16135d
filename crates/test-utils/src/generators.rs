//! Builders for WMTS request records.
//!
//! Records mirror what an upstream access-log parser produces: every tile
//! field is a string under `wmts`, next to the raw log line.

use crate::fixtures::ReferenceTile;
use serde_json::{json, Value};

/// A parsed access-log record for `GET /1.0.0/{layer}/default/{release}/{refsys}/{zoom}/{row}/{col}.jpeg`.
pub fn wmts_record(zoom: &str, row: &str, col: &str, ref_system: &str) -> Value {
    json!({
        "message": format!(
            "GET /1.0.0/ch.swisstopo.pixelkarte-farbe/default/2013/{}/{}/{}/{}.jpeg HTTP/1.1",
            ref_system, zoom, row, col
        ),
        "wmts": {
            "version": "1.0.0",
            "layer": "ch.swisstopo.pixelkarte-farbe",
            "release": "2013",
            "reference-system": ref_system,
            "zoomlevel": zoom,
            "row": row,
            "col": col,
            "filetype": "jpeg",
        }
    })
}

/// Record for a reference tile.
pub fn reference_record(tile: &ReferenceTile) -> Value {
    wmts_record(
        &tile.zoom.to_string(),
        &tile.row.to_string(),
        &tile.col.to_string(),
        tile.ref_system,
    )
}

/// Serialize records one per line, with a trailing newline.
pub fn to_json_lines(records: &[Value]) -> String {
    records
        .iter()
        .map(|r| format!("{}\n", r))
        .collect()
}

/// `count` records walking the columns of one zoom level.
pub fn column_sweep(zoom: i64, row: i64, count: usize, ref_system: &str) -> Vec<Value> {
    (0..count as i64)
        .map(|col| {
            wmts_record(
                &zoom.to_string(),
                &row.to_string(),
                &col.to_string(),
                ref_system,
            )
        })
        .collect()
}
