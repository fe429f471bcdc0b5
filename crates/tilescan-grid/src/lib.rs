//! A 2D tile grid with passability editing and a nearest-passable-tile search.
//!
//! The grid converts pixel coordinates into tiles, lets callers toggle tiles,
//! resize, and move an anchor tile. Moving the anchor runs a bounded square
//! spiral scan for the closest passable tile and caches the result.

#![warn(missing_docs)]

pub mod commands;
pub mod error;
pub mod events;
pub mod map;
pub mod search;

pub use commands::{CommandOutcome, GridCommand};
pub use error::GridError;
pub use events::GridEvent;
pub use map::{DEFAULT_TILE_SIZE, PixelPoint, Tile, TileGrid, TilePoint};
pub use search::{EDGE_ORDER, Edge, Passability, ProximitySearch, SearchReport, spiral_ring};
