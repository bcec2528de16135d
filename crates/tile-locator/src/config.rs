//! Locator configuration.
//!
//! Every option has a default matching the Swiss national WMTS grid, so an
//! empty configuration document is valid.

use crate::field_ref::{FieldRef, FieldRefError};
use crate::record::RecordFields;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wmts_common::crs::{DEFAULT_EPSG_PREFIX, DEFAULT_OUTPUT_EPSG};
use wmts_common::grid::{DEFAULT_TILE_SIZE, SWISS_ORIGIN, SWISS_RESOLUTIONS};
use wmts_common::{CrsId, EpsgMapping, GridConfig, GridConfigError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid grid: {0}")]
    Grid(#[from] GridConfigError),

    #[error("invalid field reference for '{option}': {source}")]
    Field {
        option: &'static str,
        #[source]
        source: FieldRefError,
    },

    #[error("output_epsg cannot be empty")]
    EmptyOutputEpsg,
}

/// Options of the tile locator, as read from a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfig {
    /// Abscissa of the grid origin (top-left corner), native units.
    pub x_origin: f64,
    /// Ordinate of the grid origin, native units.
    pub y_origin: f64,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Units per pixel for each zoom level, zoom 0 first.
    pub resolutions: Vec<f64>,

    /// Field under which results are written.
    pub target: String,
    pub output_epsg: String,
    /// Prepended to resolved codes to form the input CRS identifier.
    pub epsg_prefix: String,
    /// Reference-system aliases, e.g. `swissgrid: 21781`.
    pub epsg_mapping: EpsgMapping,

    pub zoomlevel_field: String,
    pub column_field: String,
    pub row_field: String,
    pub refsys_field: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            x_origin: SWISS_ORIGIN.0,
            y_origin: SWISS_ORIGIN.1,
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            resolutions: SWISS_RESOLUTIONS.to_vec(),
            target: "wmts".to_string(),
            output_epsg: DEFAULT_OUTPUT_EPSG.to_string(),
            epsg_prefix: DEFAULT_EPSG_PREFIX.to_string(),
            epsg_mapping: EpsgMapping::new(),
            zoomlevel_field: "[wmts][zoomlevel]".to_string(),
            column_field: "[wmts][col]".to_string(),
            row_field: "[wmts][row]".to_string(),
            refsys_field: "[wmts][reference-system]".to_string(),
        }
    }
}

impl LocatorConfig {
    /// The validated tile grid.
    pub fn grid(&self) -> Result<GridConfig, ConfigError> {
        Ok(GridConfig::new(
            self.x_origin,
            self.y_origin,
            self.tile_width,
            self.tile_height,
            self.resolutions.clone(),
        )?)
    }

    /// The parsed field references.
    pub fn fields(&self) -> Result<RecordFields, ConfigError> {
        Ok(RecordFields {
            zoomlevel: field("zoomlevel_field", &self.zoomlevel_field)?,
            column: field("column_field", &self.column_field)?,
            row: field("row_field", &self.row_field)?,
            refsys: field("refsys_field", &self.refsys_field)?,
            target: field("target", &self.target)?,
        })
    }

    pub fn output_crs(&self) -> Result<CrsId, ConfigError> {
        if self.output_epsg.trim().is_empty() {
            return Err(ConfigError::EmptyOutputEpsg);
        }
        Ok(CrsId::new(self.output_epsg.clone()))
    }

    /// Check every option without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        self.fields()?;
        self.output_crs()?;
        Ok(())
    }
}

fn field(option: &'static str, value: &str) -> Result<FieldRef, ConfigError> {
    FieldRef::parse(value).map_err(|source| ConfigError::Field { option, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LocatorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grid().unwrap(), GridConfig::swiss());
        assert_eq!(config.output_crs().unwrap(), CrsId::from("epsg:4326"));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: LocatorConfig = serde_json::from_str(
            r#"{"epsg_mapping": {"swissgrid": 21781}, "output_epsg": "epsg:3857"}"#,
        )
        .unwrap();
        assert_eq!(config.epsg_mapping.get("swissgrid"), Some(21781));
        assert_eq!(config.output_epsg, "epsg:3857");
        assert_eq!(config.resolutions.len(), 29);
        assert_eq!(config.target, "wmts");
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result: Result<LocatorConfig, _> = serde_json::from_str(r#"{"x_orign": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_resolutions() {
        let config = LocatorConfig {
            resolutions: vec![],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Grid(GridConfigError::EmptyResolutions))
        ));
    }

    #[test]
    fn test_bad_field_reference_names_option() {
        let config = LocatorConfig {
            row_field: "[wmts][row".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Field { option: "row_field", .. }));
        assert!(err.to_string().contains("row_field"));
    }

    #[test]
    fn test_empty_output_epsg() {
        let config = LocatorConfig {
            output_epsg: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyOutputEpsg)));
    }
}
