//! Tile and pixel coordinate types.

/// Represents a point in tile coordinates (column, row).
///
/// Signed so that spiral rings and pixel conversions can describe tiles
/// left of or above the grid; bounds are checked by the grid itself.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePoint {
    /// The x-coordinate (column index) in the grid.
    pub x: i32,
    /// The y-coordinate (row index) in the grid.
    pub y: i32,
}

impl TilePoint {
    /// Creates a new `TilePoint`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, i.e. the spiral ring `other` sits on when the
    /// scan is centered on `self`.
    #[must_use]
    pub fn ring_distance(&self, other: TilePoint) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl std::fmt::Display for TilePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Represents a point in pixel coordinates, as supplied by the presentation layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    /// The x-coordinate in pixels.
    pub x: f64,
    /// The y-coordinate in pixels.
    pub y: f64,
}

impl PixelPoint {
    /// Creates a new `PixelPoint`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
