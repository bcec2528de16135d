//! Record enrichment: reads the tile fields of a JSON record and writes the
//! located coordinates back under the target field.

use crate::config::{ConfigError, LocatorConfig};
use crate::field_ref::FieldRef;
use crate::locator::TileLocator;
use projection::Reprojector;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use wmts_common::tile::parse_index;
use wmts_common::{LocateError, OutputPoint, Resolution, TileError, TileField, TileRef};

/// Output fields written on success; all of them are cleared on failure.
pub const OUTPUT_FIELDS: [&str; 9] = [
    "service",
    "input_epsg",
    "input_x",
    "input_y",
    "input_xy",
    "output_epsg",
    "output_x",
    "output_y",
    "output_xy",
];

/// Field written on failure.
pub const ERROR_FIELD: &str = "errmsg";

/// Where the enricher reads its inputs and writes its results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub zoomlevel: FieldRef,
    pub column: FieldRef,
    pub row: FieldRef,
    pub refsys: FieldRef,
    pub target: FieldRef,
}

impl Default for RecordFields {
    fn default() -> Self {
        Self {
            zoomlevel: FieldRef::from_segments(["wmts", "zoomlevel"]),
            column: FieldRef::from_segments(["wmts", "col"]),
            row: FieldRef::from_segments(["wmts", "row"]),
            refsys: FieldRef::from_segments(["wmts", "reference-system"]),
            target: FieldRef::from_segments(["wmts"]),
        }
    }
}

/// What happened to one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    Enriched(Resolution),
    Failed(LocateError),
    /// The record is not a JSON object and was left untouched.
    Skipped,
}

/// Applies a [`TileLocator`] to JSON records.
#[derive(Debug, Clone)]
pub struct RecordEnricher {
    locator: TileLocator,
    fields: RecordFields,
}

impl RecordEnricher {
    pub fn new(locator: TileLocator, fields: RecordFields) -> Self {
        Self { locator, fields }
    }

    /// Build a locator and field set from configuration.
    pub fn from_config(
        config: &LocatorConfig,
        reprojector: Arc<dyn Reprojector>,
    ) -> Result<Self, ConfigError> {
        let locator = TileLocator::from_config(config, reprojector)?;
        Ok(Self::new(locator, config.fields()?))
    }

    pub fn locator(&self) -> &TileLocator {
        &self.locator
    }

    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }

    /// Read the tile reference out of a record.
    pub fn extract_tile(&self, record: &Value) -> Result<TileRef, TileError> {
        Ok(TileRef {
            zoom: index_value(TileField::ZoomLevel, self.fields.zoomlevel.get(record))?,
            col: index_value(TileField::Column, self.fields.column.get(record))?,
            row: index_value(TileField::Row, self.fields.row.get(record))?,
            ref_system: ref_system_value(self.fields.refsys.get(record))?,
        })
    }

    /// Locate the record's tile and annotate the record.
    ///
    /// Never fails: on error exactly one `errmsg` field is written under the
    /// target and none of the success fields.
    pub fn enrich(&self, record: &mut Value) -> Enrichment {
        if !record.is_object() {
            return Enrichment::Skipped;
        }

        let result = self
            .extract_tile(record)
            .map_err(LocateError::from)
            .and_then(|tile| self.locator.locate(&tile));

        let Some(target) = self.fields.target.object_mut(record) else {
            return Enrichment::Skipped;
        };

        match result {
            Ok(resolution) => {
                write_resolution(target, &resolution);
                Enrichment::Enriched(resolution)
            }
            Err(err) => {
                write_error(target, &err);
                Enrichment::Failed(err)
            }
        }
    }
}

fn index_value(field: TileField, value: Option<&Value>) -> Result<i64, TileError> {
    match value {
        None | Some(Value::Null) => Err(TileError::Missing { field }),
        Some(Value::String(s)) => parse_index(field, s),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| TileError::NotAnInteger {
            field,
            value: n.to_string(),
        }),
        Some(other) => Err(TileError::NotAnInteger {
            field,
            value: other.to_string(),
        }),
    }
}

/// An absent reference system is an empty token, left for the reprojector
/// to reject.
fn ref_system_value(value: Option<&Value>) -> Result<String, TileError> {
    let field = TileField::ReferenceSystem;
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(TileError::InvalidValue {
            field,
            value: other.to_string(),
        }),
    }
}

fn write_resolution(target: &mut Map<String, Value>, resolution: &Resolution) {
    target.remove(ERROR_FIELD);

    let (output_x, output_y) = match resolution.output {
        OutputPoint::Native(p) => (json!(p.x), json!(p.y)),
        OutputPoint::Projected(p) => (json!(p.x), json!(p.y)),
    };

    target.insert("service".into(), json!("wmts"));
    target.insert("input_epsg".into(), json!(resolution.input_epsg));
    target.insert("input_x".into(), json!(resolution.input.x));
    target.insert("input_y".into(), json!(resolution.input.y));
    target.insert("input_xy".into(), json!(resolution.input.to_string()));
    target.insert("output_epsg".into(), json!(resolution.output_epsg));
    target.insert("output_x".into(), output_x);
    target.insert("output_y".into(), output_y);
    target.insert("output_xy".into(), json!(resolution.output.to_string()));
}

fn write_error(target: &mut Map<String, Value>, err: &LocateError) {
    for field in OUTPUT_FIELDS {
        target.remove(field);
    }
    target.insert(ERROR_FIELD.into(), json!(err.user_message()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::BuiltinReprojector;
    use wmts_common::GridConfig;

    fn enricher() -> RecordEnricher {
        let locator = TileLocator::new(GridConfig::swiss(), Arc::new(BuiltinReprojector));
        RecordEnricher::new(locator, RecordFields::default())
    }

    #[test]
    fn test_index_value_types() {
        let f = TileField::Row;
        assert_eq!(index_value(f, Some(&json!("470"))), Ok(470));
        assert_eq!(index_value(f, Some(&json!(470))), Ok(470));
        assert_eq!(index_value(f, None), Err(TileError::Missing { field: f }));
        assert_eq!(index_value(f, Some(&Value::Null)), Err(TileError::Missing { field: f }));
        assert!(index_value(f, Some(&json!(4.5))).is_err());
        assert!(index_value(f, Some(&json!(true))).is_err());
        assert!(index_value(f, Some(&json!(["1"]))).is_err());
    }

    #[test]
    fn test_ref_system_value_types() {
        assert_eq!(ref_system_value(Some(&json!("swissgrid"))), Ok("swissgrid".into()));
        assert_eq!(ref_system_value(Some(&json!(21781))), Ok("21781".into()));
        assert_eq!(ref_system_value(None), Ok(String::new()));
        assert_eq!(ref_system_value(Some(&Value::Null)), Ok(String::new()));
        assert!(matches!(
            ref_system_value(Some(&json!({"a": 1}))),
            Err(TileError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_enrich_native_target_keeps_integers() {
        let locator = TileLocator::new(GridConfig::swiss(), Arc::new(BuiltinReprojector))
            .with_output_epsg("epsg:21781");
        let enricher = RecordEnricher::new(locator, RecordFields::default());

        let mut record = json!({"wmts": {"zoomlevel": "23", "row": "470", "col": "561", "reference-system": "21781"}});
        let outcome = enricher.enrich(&mut record);

        assert!(matches!(outcome, Enrichment::Enriched(_)));
        assert_eq!(record["wmts"]["output_x"], json!(707488));
        assert_eq!(record["wmts"]["output_y"], json!(109104));
        assert_eq!(record["wmts"]["output_xy"], "707488,109104");
    }

    #[test]
    fn test_failure_clears_stale_output() {
        let mut record = json!({"wmts": {
            "zoomlevel": "", "row": "470", "col": "561", "reference-system": "21781",
            "input_x": 1, "output_xy": "1,2"
        }});
        let outcome = enricher().enrich(&mut record);

        assert!(matches!(outcome, Enrichment::Failed(LocateError::InvalidTile(_))));
        assert_eq!(record["wmts"]["errmsg"], "Bad parameter received from upstream filter");
        assert!(record["wmts"].get("input_x").is_none());
        assert!(record["wmts"].get("output_xy").is_none());
        // upstream fields stay
        assert_eq!(record["wmts"]["row"], "470");
    }

    #[test]
    fn test_non_object_record_is_skipped() {
        let mut record = json!("GET /1.0.0/layer/default/2013/21781/23/470/561.jpeg");
        assert_eq!(enricher().enrich(&mut record), Enrichment::Skipped);
        assert!(record.is_string());
    }
}
