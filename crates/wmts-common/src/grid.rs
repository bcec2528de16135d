//! Tile pyramid parameters.

use crate::GridConfigError;

/// Origin of the Swiss national WMTS grid (LV03 metres).
pub const SWISS_ORIGIN: (f64, f64) = (420_000.0, 350_000.0);

/// Default tile edge in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Resolutions (metres per pixel) of the Swiss national WMTS pyramid,
/// indexed by zoom level.
pub const SWISS_RESOLUTIONS: [f64; 29] = [
    4000.0, 3750.0, 3500.0, 3250.0, 3000.0, 2750.0, 2500.0, 2250.0, 2000.0, 1750.0, 1500.0,
    1250.0, 1000.0, 750.0, 650.0, 500.0, 250.0, 100.0, 50.0, 20.0, 10.0, 5.0, 2.5, 2.0, 1.5,
    1.0, 0.5, 0.25, 0.1,
];

/// Immutable description of a tile pyramid.
///
/// Rows run top-to-bottom from the origin while the native y axis increases
/// upward, so the origin is the top-left corner of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    origin_x: f64,
    origin_y: f64,
    tile_width: u32,
    tile_height: u32,
    resolutions: Vec<f64>,
}

impl GridConfig {
    /// Create a validated grid.
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        tile_width: u32,
        tile_height: u32,
        resolutions: Vec<f64>,
    ) -> Result<Self, GridConfigError> {
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(GridConfigError::InvalidOrigin {
                x: origin_x,
                y: origin_y,
            });
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(GridConfigError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        if resolutions.is_empty() {
            return Err(GridConfigError::EmptyResolutions);
        }
        if let Some((zoom, &value)) = resolutions
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r <= 0.0)
        {
            return Err(GridConfigError::InvalidResolution { zoom, value });
        }

        Ok(Self {
            origin_x,
            origin_y,
            tile_width,
            tile_height,
            resolutions,
        })
    }

    /// The Swiss national grid used by swisstopo's WMTS.
    pub fn swiss() -> Self {
        Self {
            origin_x: SWISS_ORIGIN.0,
            origin_y: SWISS_ORIGIN.1,
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
            resolutions: SWISS_RESOLUTIONS.to_vec(),
        }
    }

    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn resolutions(&self) -> &[f64] {
        &self.resolutions
    }

    /// Number of zoom levels.
    pub fn levels(&self) -> usize {
        self.resolutions.len()
    }

    /// Resolution for a zoom level; `None` when negative or past the last level.
    pub fn resolution(&self, zoom: i64) -> Option<f64> {
        usize::try_from(zoom)
            .ok()
            .and_then(|z| self.resolutions.get(z))
            .copied()
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::swiss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiss_grid() {
        let grid = GridConfig::swiss();
        assert_eq!(grid.levels(), 29);
        assert_eq!(grid.resolution(0), Some(4000.0));
        assert_eq!(grid.resolution(9), Some(1750.0));
        assert_eq!(grid.resolution(23), Some(2.0));
        assert_eq!(grid.resolution(28), Some(0.1));
        assert_eq!(grid.resolution(29), None);
        assert_eq!(grid.resolution(-1), None);
    }

    #[test]
    fn test_rejects_empty_resolutions() {
        let result = GridConfig::new(0.0, 0.0, 256, 256, vec![]);
        assert_eq!(result, Err(GridConfigError::EmptyResolutions));
    }

    #[test]
    fn test_rejects_bad_resolution() {
        let result = GridConfig::new(0.0, 0.0, 256, 256, vec![10.0, 0.0, 1.0]);
        assert_eq!(
            result,
            Err(GridConfigError::InvalidResolution { zoom: 1, value: 0.0 })
        );

        let result = GridConfig::new(0.0, 0.0, 256, 256, vec![f64::NAN]);
        assert!(matches!(
            result,
            Err(GridConfigError::InvalidResolution { zoom: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_tile_size() {
        let result = GridConfig::new(0.0, 0.0, 0, 256, vec![1.0]);
        assert!(matches!(result, Err(GridConfigError::InvalidTileSize { .. })));
    }

    #[test]
    fn test_rejects_infinite_origin() {
        let result = GridConfig::new(f64::INFINITY, 0.0, 256, 256, vec![1.0]);
        assert!(matches!(result, Err(GridConfigError::InvalidOrigin { .. })));
    }
}
