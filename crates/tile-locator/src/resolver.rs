//! Grid resolver: tile indices to a point in the grid's native CRS.

use wmts_common::{GridConfig, NativePoint, TileError, TileRef};

/// Compute the native point of a tile.
///
/// The point is the centre of the tile, floored to whole native units:
///
/// ```text
/// x = floor(origin_x + (col + 0.5) * tile_width  * resolution)
/// y = floor(origin_y - (row + 0.5) * tile_height * resolution)
/// ```
///
/// Flooring goes toward negative infinity, so a tile whose centre lies just
/// below the native y axis gets `-1`, not `0`.
pub fn resolve(grid: &GridConfig, tile: &TileRef) -> Result<NativePoint, TileError> {
    let resolution = grid
        .resolution(tile.zoom)
        .ok_or(TileError::ZoomOutOfRange {
            zoom: tile.zoom,
            levels: grid.levels(),
        })?;

    let dx = (tile.col as f64 + 0.5) * f64::from(grid.tile_width()) * resolution;
    let dy = (tile.row as f64 + 0.5) * f64::from(grid.tile_height()) * resolution;

    let x = floor_to_i64(grid.origin_x() + dx)?;
    let y = floor_to_i64(grid.origin_y() - dy)?;

    Ok(NativePoint::new(x, y))
}

fn floor_to_i64(value: f64) -> Result<i64, TileError> {
    let floored = value.floor();
    // 2^63 itself is out of range, -2^63 is not
    let upper = -(i64::MIN as f64);
    if floored.is_finite() && floored >= i64::MIN as f64 && floored < upper {
        Ok(floored as i64)
    } else {
        Err(TileError::CoordinateOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiss_tile_23_470_561() {
        let point = resolve(&GridConfig::swiss(), &TileRef::new(23, 561, 470, "21781")).unwrap();
        assert_eq!(point, NativePoint::new(707488, 109104));
    }

    #[test]
    fn test_swiss_tile_9_371_714() {
        let point = resolve(&GridConfig::swiss(), &TileRef::new(9, 714, 371, "swissgrid")).unwrap();
        assert_eq!(point, NativePoint::new(320516000, -166082000));
    }

    #[test]
    fn test_floor_goes_toward_negative_infinity() {
        // 1x1 pixel tiles, 0.3 units per pixel: row 0 centre is at y = -0.15
        let grid = GridConfig::new(0.0, 0.0, 1, 1, vec![0.3]).unwrap();
        let point = resolve(&grid, &TileRef::new(0, 0, 0, "4326")).unwrap();
        assert_eq!(point, NativePoint::new(0, -1));
    }

    #[test]
    fn test_floor_applies_after_adding_origin() {
        // origin 0.6 + centre offset 0.15 = 0.75 floors to 0;
        // origin 0.6 - 0.15 = 0.45 floors to 0
        let grid = GridConfig::new(0.6, 0.6, 1, 1, vec![0.3]).unwrap();
        let point = resolve(&grid, &TileRef::new(0, 0, 0, "4326")).unwrap();
        assert_eq!(point, NativePoint::new(0, 0));
    }

    #[test]
    fn test_fractional_offset_below_integer_origin() {
        // 350000 - 100.5 floors to 349899, not 350000 - floor(100.5)
        let grid = GridConfig::new(420000.0, 350000.0, 1, 1, vec![201.0]).unwrap();
        let point = resolve(&grid, &TileRef::new(0, 0, 0, "21781")).unwrap();
        assert_eq!(point, NativePoint::new(420100, 349899));
    }

    #[test]
    fn test_zoom_out_of_range() {
        let grid = GridConfig::swiss();
        for zoom in [29, 30, 99_999_999, -1, i64::MIN] {
            let err = resolve(&grid, &TileRef::new(zoom, 0, 0, "21781")).unwrap_err();
            assert_eq!(err, TileError::ZoomOutOfRange { zoom, levels: 29 });
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        let err = resolve(&GridConfig::swiss(), &TileRef::new(0, i64::MAX, 0, "21781")).unwrap_err();
        assert_eq!(err, TileError::CoordinateOverflow);
    }

    #[test]
    fn test_negative_indices() {
        let point = resolve(&GridConfig::swiss(), &TileRef::new(28, -1, -1, "21781")).unwrap();
        // centre offset is -0.5 * 256 * 0.1 = -12.8
        assert_eq!(point, NativePoint::new(419987, 350012));
    }
}
