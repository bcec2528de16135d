//! Point types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile point in grid-native units, floored to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativePoint {
    pub x: i64,
    pub y: i64,
}

impl NativePoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// `"x,y"`, the combined form written next to the separate coordinates.
impl fmt::Display for NativePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A point in a target CRS. For geographic CRSs x is longitude and y latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<NativePoint> for Point {
    fn from(p: NativePoint) -> Self {
        Point::new(p.x as f64, p.y as f64)
    }
}

/// `"x,y"` with shortest round-trip formatting (`8.829295858079231,46.12486163053951`).
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?},{:?}", self.x, self.y)
    }
}
