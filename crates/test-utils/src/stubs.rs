//! Stub reprojectors for exercising the normalizer without a projection
//! backend.

use crate::fixtures::{crs, tiles, ReferenceTile};
use projection::Reprojector;
use std::sync::atomic::{AtomicUsize, Ordering};
use wmts_common::{CrsId, Point, ReprojectError};

/// Answers from a fixed table of `(from, to, input) -> output` entries.
///
/// Lookups are exact; anything else fails with `UnknownCrs(from)`.
#[derive(Debug, Clone, Default)]
pub struct TableReprojector {
    entries: Vec<(CrsId, CrsId, Point, Point)>,
}

impl TableReprojector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the LV03 to WGS84 answers for every reference tile.
    pub fn reference() -> Self {
        [tiles::SWISS_Z23, tiles::SWISSGRID_Z9, tiles::CUSTOM_Z9]
            .iter()
            .fold(Self::new(), |table, tile| table.with_tile(tile))
    }

    pub fn with(
        mut self,
        from: impl Into<CrsId>,
        to: impl Into<CrsId>,
        input: (f64, f64),
        output: (f64, f64),
    ) -> Self {
        self.entries.push((
            from.into(),
            to.into(),
            Point::new(input.0, input.1),
            Point::new(output.0, output.1),
        ));
        self
    }

    fn with_tile(self, tile: &ReferenceTile) -> Self {
        self.with(
            crs::LV03,
            crs::WGS84,
            (tile.input.0 as f64, tile.input.1 as f64),
            tile.output,
        )
    }
}

impl Reprojector for TableReprojector {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError> {
        self.entries
            .iter()
            .find(|(f, t, input, _)| f == from && t == to && *input == point)
            .map(|(_, _, _, output)| *output)
            .ok_or_else(|| ReprojectError::UnknownCrs(from.to_string()))
    }
}

/// Always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingReprojector {
    error: ReprojectError,
}

impl FailingReprojector {
    pub fn new(error: ReprojectError) -> Self {
        Self { error }
    }

    /// Fails as a backend that does not know the source CRS would.
    pub fn unknown_crs() -> Self {
        Self::new(ReprojectError::UnknownCrs(crs::UNKNOWN_CODE.to_string()))
    }
}

impl Reprojector for FailingReprojector {
    fn reproject(&self, _point: Point, _from: &CrsId, _to: &CrsId) -> Result<Point, ReprojectError> {
        Err(self.error.clone())
    }
}

/// Returns a fixed point; handy when only the call matters.
#[derive(Debug, Clone, Copy)]
pub struct FixedReprojector(pub Point);

impl Reprojector for FixedReprojector {
    fn reproject(&self, _point: Point, _from: &CrsId, _to: &CrsId) -> Result<Point, ReprojectError> {
        Ok(self.0)
    }
}

/// Counts calls before delegating to `inner`.
#[derive(Debug, Default)]
pub struct CountingReprojector<R> {
    inner: R,
    calls: AtomicUsize,
}

impl<R: Reprojector> CountingReprojector<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<R: Reprojector> Reprojector for CountingReprojector<R> {
    fn reproject(&self, point: Point, from: &CrsId, to: &CrsId) -> Result<Point, ReprojectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.reproject(point, from, to)
    }
}
