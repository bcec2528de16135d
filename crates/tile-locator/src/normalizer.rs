//! CRS normalizer: decides whether a native point must be reprojected.

use projection::Reprojector;
use wmts_common::{CrsId, EpsgMapping, NativePoint, OutputPoint, ReprojectError, Resolution};

/// Qualified CRS identifier for a reference-system token.
///
/// Aliases from `mapping` win; any other token is used verbatim, without
/// checking that it is a valid EPSG code.
pub fn input_crs(ref_system: &str, mapping: &EpsgMapping, prefix: &str) -> CrsId {
    CrsId::with_prefix(prefix, &mapping.lookup(ref_system).code())
}

/// Build the resolution of a native point, reprojecting when the input CRS
/// differs from `output_epsg`.
///
/// CRS identifiers are compared as plain strings, so `epsg:4326` and
/// `EPSG:4326` are different and trigger a reprojection call.
pub fn normalize(
    ref_system: &str,
    mapping: &EpsgMapping,
    prefix: &str,
    output_epsg: &CrsId,
    native: NativePoint,
    reprojector: &dyn Reprojector,
) -> Result<Resolution, ReprojectError> {
    let input_epsg = input_crs(ref_system, mapping, prefix);

    let output = if &input_epsg == output_epsg {
        OutputPoint::Native(native)
    } else {
        let point = reprojector.reproject(native.into(), &input_epsg, output_epsg)?;
        if !point.is_finite() {
            return Err(ReprojectError::invalid_point(
                point.x,
                point.y,
                "reprojected point is not finite",
            ));
        }
        OutputPoint::Projected(point)
    };

    Ok(Resolution {
        input_epsg,
        input: native,
        output_epsg: output_epsg.clone(),
        output,
    })
}
