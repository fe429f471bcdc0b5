//! This module defines the error types used by the `tilescan-grid` crate.

#![warn(missing_docs)]

use thiserror::Error;

use crate::map::TilePoint;

/// Error type for grid operations.
///
/// Every precondition violation inside the core surfaces as one of these
/// variants. None of them are fatal; the caller decides whether to report
/// or ignore them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height is zero, or `width * height` does not fit in memory.
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in tiles.
        width: usize,
        /// Requested height in tiles.
        height: usize,
    },
    /// Tile size in pixels must be positive.
    #[error("Invalid tile size: {0}")]
    InvalidTileSize(u32),
    /// Pixel coordinates were NaN or infinite and name no tile.
    #[error("Pixel coordinates must be finite")]
    NonFinitePixel,
    /// Stored tiles do not cover `width * height` cells.
    #[error("Expected {expected} tiles, found {actual}")]
    TileCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Number of tiles supplied.
        actual: usize,
    },
    /// A tile coordinate lies outside the current grid.
    #[error("Tile ({x}, {y}) is out of bounds")]
    OutOfBounds {
        /// Column of the offending tile.
        x: i32,
        /// Row of the offending tile.
        y: i32,
    },
    /// The anchor tile cannot have its passability toggled.
    #[error("Tile ({x}, {y}) is the anchor and cannot be toggled")]
    AnchorProtected {
        /// Column of the anchor.
        x: i32,
        /// Row of the anchor.
        y: i32,
    },
    /// The spiral scan ran out of radii without meeting a passable tile.
    #[error("No passable tile found around {start} within {radii} radii")]
    NoPassableTileFound {
        /// Tile the scan started from.
        start: TilePoint,
        /// Number of rings that were walked.
        radii: usize,
    },
    /// A text command could not be parsed.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl GridError {
    /// Builds an `OutOfBounds` error for the given tile.
    pub fn out_of_bounds(p: TilePoint) -> Self {
        GridError::OutOfBounds { x: p.x, y: p.y }
    }
}
