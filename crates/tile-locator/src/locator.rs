//! Composition of the grid resolver and the CRS normalizer.

use crate::config::{ConfigError, LocatorConfig};
use crate::{normalizer, resolver};
use projection::Reprojector;
use std::fmt;
use std::sync::Arc;
use wmts_common::crs::{DEFAULT_EPSG_PREFIX, DEFAULT_OUTPUT_EPSG};
use wmts_common::{CrsId, EpsgMapping, GridConfig, LocateError, Resolution, TileRef};

/// Locates tiles of one grid and reports their coordinates in a target CRS.
///
/// All state is read-only after construction; a locator can be shared
/// between threads.
#[derive(Clone)]
pub struct TileLocator {
    grid: GridConfig,
    epsg_mapping: EpsgMapping,
    epsg_prefix: String,
    output_epsg: CrsId,
    reprojector: Arc<dyn Reprojector>,
}

impl TileLocator {
    /// Locator targeting `epsg:4326`, with no aliases.
    pub fn new(grid: GridConfig, reprojector: Arc<dyn Reprojector>) -> Self {
        Self {
            grid,
            epsg_mapping: EpsgMapping::new(),
            epsg_prefix: DEFAULT_EPSG_PREFIX.to_string(),
            output_epsg: CrsId::from(DEFAULT_OUTPUT_EPSG),
            reprojector,
        }
    }

    /// Locator for a validated configuration.
    pub fn from_config(
        config: &LocatorConfig,
        reprojector: Arc<dyn Reprojector>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(config.grid()?, reprojector)
            .with_epsg_mapping(config.epsg_mapping.clone())
            .with_epsg_prefix(config.epsg_prefix.clone())
            .with_output_epsg(config.output_crs()?))
    }

    pub fn with_epsg_mapping(mut self, mapping: EpsgMapping) -> Self {
        self.epsg_mapping = mapping;
        self
    }

    pub fn with_output_epsg(mut self, output_epsg: impl Into<CrsId>) -> Self {
        self.output_epsg = output_epsg.into();
        self
    }

    pub fn with_epsg_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.epsg_prefix = prefix.into();
        self
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn output_epsg(&self) -> &CrsId {
        &self.output_epsg
    }

    /// Resolve a tile and normalize its point to the target CRS.
    ///
    /// Tile validation happens before any coordinate math, so an
    /// `InvalidTile` error never reaches the reprojector.
    pub fn locate(&self, tile: &TileRef) -> Result<Resolution, LocateError> {
        let native = resolver::resolve(&self.grid, tile)?;

        let resolution = normalizer::normalize(
            &tile.ref_system,
            &self.epsg_mapping,
            &self.epsg_prefix,
            &self.output_epsg,
            native,
            self.reprojector.as_ref(),
        )?;

        Ok(resolution)
    }
}

impl fmt::Debug for TileLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileLocator")
            .field("grid", &self.grid)
            .field("epsg_mapping", &self.epsg_mapping)
            .field("epsg_prefix", &self.epsg_prefix)
            .field("output_epsg", &self.output_epsg)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::BuiltinReprojector;
    use wmts_common::{NativePoint, OutputPoint, TileError};

    fn swiss_locator() -> TileLocator {
        TileLocator::new(GridConfig::swiss(), Arc::new(BuiltinReprojector))
            .with_epsg_mapping(EpsgMapping::new().with_alias("swissgrid", 21781))
    }

    #[test]
    fn test_locate_reprojects_to_wgs84() {
        let resolution = swiss_locator()
            .locate(&TileRef::new(23, 561, 470, "21781"))
            .unwrap();

        assert_eq!(resolution.input_epsg, CrsId::from("epsg:21781"));
        assert_eq!(resolution.input, NativePoint::new(707488, 109104));
        assert_eq!(resolution.output_epsg, CrsId::from("epsg:4326"));

        let out = resolution.output.as_point();
        assert!((out.x - 8.829295858079231).abs() < 1e-4);
        assert!((out.y - 46.12486163053951).abs() < 1e-4);
    }

    #[test]
    fn test_locate_native_target() {
        let locator = swiss_locator().with_output_epsg("epsg:21781");
        let resolution = locator.locate(&TileRef::new(23, 561, 470, "swissgrid")).unwrap();
        assert_eq!(
            resolution.output,
            OutputPoint::Native(NativePoint::new(707488, 109104))
        );
    }

    #[test]
    fn test_invalid_tile_before_reprojection() {
        let err = swiss_locator()
            .locate(&TileRef::new(99, 0, 0, "99999999"))
            .unwrap_err();
        assert_eq!(
            err,
            LocateError::InvalidTile(TileError::ZoomOutOfRange { zoom: 99, levels: 29 })
        );
    }

    #[test]
    fn test_unknown_code_fails_reprojection() {
        let err = swiss_locator()
            .locate(&TileRef::new(23, 561, 470, "99999999"))
            .unwrap_err();
        assert!(matches!(err, LocateError::ReprojectionFailed(_)));
        assert_eq!(err.user_message(), "Unable to reproject tile coordinates");
    }

    #[test]
    fn test_from_config() {
        let config = LocatorConfig {
            output_epsg: "epsg:21781".to_string(),
            ..Default::default()
        };
        let locator = TileLocator::from_config(&config, Arc::new(BuiltinReprojector)).unwrap();
        assert_eq!(locator.output_epsg(), &CrsId::from("epsg:21781"));
        assert_eq!(locator.grid(), &GridConfig::swiss());
    }

    #[test]
    fn test_debug_omits_reprojector() {
        let text = format!("{:?}", swiss_locator());
        assert!(text.starts_with("TileLocator"));
        assert!(text.contains("epsg:4326"));
    }
}
