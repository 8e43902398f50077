//! Projected planar coordinate type.
//!
//! Graph vertices carry coordinates in a projected CRS (e.g. web mercator),
//! so distances are plain Euclidean in projection units (meters).  `f64` is
//! used because vertex tables are small relative to link tables and the
//! nearest-vertex snap threshold needs sub-meter resolution.

/// A projected planar coordinate in meters.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than `distance_m` and sufficient
    /// for nearest-neighbor comparisons.
    #[inline]
    pub fn distance_2(self, other: Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance in projection meters.
    #[inline]
    pub fn distance_m(self, other: Coordinate) -> f64 {
        self.distance_2(other).sqrt()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
