//! Tile grid and coordinate types.
//!
//! This module provides the tile grid that owns passability state, the anchor
//! tile and the cached search result, together with the point types used to
//! address it in tile and pixel space.

pub mod point_types;
pub mod tile_grid;

pub use point_types::{PixelPoint, TilePoint};
pub use tile_grid::{DEFAULT_TILE_SIZE, Tile, TileGrid};
