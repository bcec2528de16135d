//! Swiss national grids (CH1903 / LV03 and CH1903+ / LV95).
//!
//! Uses swisstopo's published approximation formulas between the Swiss
//! grids and WGS84. Accuracy is about one metre inside Switzerland; the
//! polynomials are not meaningful far outside it.
//!
//! Reference: swisstopo, "Approximate formulas for the transformation
//! between Swiss projection coordinates and WGS84".

/// False easting/northing of LV03 (EPSG:21781), in metres.
pub const LV03_FALSE_EASTING: f64 = 600_000.0;
pub const LV03_FALSE_NORTHING: f64 = 200_000.0;

/// LV95 (EPSG:2056) coordinates are LV03 shifted by these offsets.
pub const LV95_EASTING_OFFSET: f64 = 2_000_000.0;
pub const LV95_NORTHING_OFFSET: f64 = 1_000_000.0;

/// Convert LV03 easting/northing (metres) to WGS84 (lon, lat) in degrees.
pub fn lv03_to_wgs84(easting: f64, northing: f64) -> (f64, f64) {
    // auxiliary values in 1000 km
    let y = (easting - LV03_FALSE_EASTING) / 1_000_000.0;
    let x = (northing - LV03_FALSE_NORTHING) / 1_000_000.0;

    // results in 10000" units
    let lon = 2.6779094 + 4.728982 * y + 0.791484 * y * x + 0.1306 * y * x * x
        - 0.0436 * y * y * y;
    let lat = 16.9023892 + 3.238272 * x
        - 0.270978 * y * y
        - 0.002528 * x * x
        - 0.0447 * y * y * x
        - 0.0140 * x * x * x;

    (lon * 100.0 / 36.0, lat * 100.0 / 36.0)
}

/// Convert WGS84 (lon, lat) in degrees to LV03 easting/northing (metres).
pub fn wgs84_to_lv03(lon: f64, lat: f64) -> (f64, f64) {
    // auxiliary values in 10000" relative to Bern
    let phi = (lat * 3600.0 - 169_028.66) / 10_000.0;
    let lambda = (lon * 3600.0 - 26_782.5) / 10_000.0;

    let easting = 600_072.37 + 211_455.93 * lambda
        - 10_938.51 * lambda * phi
        - 0.36 * lambda * phi * phi
        - 44.54 * lambda * lambda * lambda;
    let northing = 200_147.07
        + 308_807.95 * phi
        + 3_745.25 * lambda * lambda
        + 76.63 * phi * phi
        - 194.56 * lambda * lambda * phi
        + 119.79 * phi * phi * phi;

    (easting, northing)
}

/// Convert LV95 easting/northing (metres) to WGS84 (lon, lat) in degrees.
pub fn lv95_to_wgs84(easting: f64, northing: f64) -> (f64, f64) {
    lv03_to_wgs84(
        easting - LV95_EASTING_OFFSET,
        northing - LV95_NORTHING_OFFSET,
    )
}

/// Convert WGS84 (lon, lat) in degrees to LV95 easting/northing (metres).
pub fn wgs84_to_lv95(lon: f64, lat: f64) -> (f64, f64) {
    let (e, n) = wgs84_to_lv03(lon, lat);
    (e + LV95_EASTING_OFFSET, n + LV95_NORTHING_OFFSET)
}
