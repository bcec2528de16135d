//! Common test fixtures for tile location tests.
//!
//! Reference values come from requests logged against the Swiss federal
//! WMTS service and were reprojected with GeoTools.

use wmts_common::GridConfig;

/// Coordinate reference system identifiers used across tests.
pub mod crs {
    pub const WGS84: &str = "epsg:4326";
    pub const LV03: &str = "epsg:21781";
    pub const LV95: &str = "epsg:2056";
    pub const WEB_MERCATOR: &str = "epsg:3857";

    /// Alias used by the Swiss WMTS for LV03.
    pub const SWISSGRID_ALIAS: &str = "swissgrid";
    pub const SWISSGRID_CODE: u32 = 21781;

    /// Syntactically valid code that no backend knows.
    pub const UNKNOWN_CODE: &str = "99999999";
}

/// Common grid definitions for testing.
pub mod grids {
    /// Coarser 15-level pyramid used by some Swiss deployments.
    pub const CUSTOM_RESOLUTIONS: [f64; 15] = [
        500.0, 250.0, 100.0, 50.0, 20.0, 10.0, 5.0, 2.5, 2.0, 1.5, 1.0, 0.5, 0.25, 0.1, 0.05,
    ];

    /// A tiny two-level grid with its origin at zero, for hand-computed cases.
    pub const UNIT_RESOLUTIONS: [f64; 2] = [1.0, 0.5];
}

/// The 15-level custom grid on the Swiss origin.
pub fn custom_grid() -> GridConfig {
    GridConfig::new(420000.0, 350000.0, 256, 256, grids::CUSTOM_RESOLUTIONS.to_vec())
        .expect("custom grid fixture is valid")
}

/// Origin (0, 0), 1×1 tiles, resolutions `[1.0, 0.5]`.
pub fn unit_grid() -> GridConfig {
    GridConfig::new(0.0, 0.0, 1, 1, grids::UNIT_RESOLUTIONS.to_vec())
        .expect("unit grid fixture is valid")
}

/// A tile request with its expected location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTile {
    pub zoom: i64,
    pub col: i64,
    pub row: i64,
    pub ref_system: &'static str,
    /// Native tile center.
    pub input: (i64, i64),
    pub input_xy: &'static str,
    /// Tile center in WGS84 (lon, lat).
    pub output: (f64, f64),
    pub output_xy: &'static str,
}

impl ReferenceTile {
    pub fn tile_ref(&self) -> wmts_common::TileRef {
        wmts_common::TileRef::new(self.zoom, self.col, self.row, self.ref_system)
    }
}

/// Reference tiles on the default Swiss grid.
pub mod tiles {
    use super::ReferenceTile;

    /// Zoom 23 tile near Lugano.
    pub const SWISS_Z23: ReferenceTile = ReferenceTile {
        zoom: 23,
        col: 561,
        row: 470,
        ref_system: "21781",
        input: (707488, 109104),
        input_xy: "707488,109104",
        output: (8.829295858079231, 46.12486163053951),
        output_xy: "8.829295858079231,46.12486163053951",
    };

    /// Zoom 9 tile whose center lies far outside the LV03 domain.
    pub const SWISSGRID_Z9: ReferenceTile = ReferenceTile {
        zoom: 9,
        col: 714,
        row: 371,
        ref_system: "swissgrid",
        input: (320516000, -166082000),
        input_xy: "320516000,-166082000",
        output: (7.438691675813199, -43.38015041464443),
        output_xy: "7.438691675813199,-43.38015041464443",
    };

    /// Zoom 9 tile on [`super::custom_grid`].
    pub const CUSTOM_Z9: ReferenceTile = ReferenceTile {
        zoom: 9,
        col: 731,
        row: 374,
        ref_system: "swissgrid",
        input: (700896, 206192),
        input_xy: "700896,206192",
        output: (8.765263559441715, 46.999112812287045),
        output_xy: "8.765263559441715,46.999112812287045",
    };
}
