//! Advisory notifications raised by the grid.
//!
//! The grid queues these instead of calling back into its owner; the owner
//! polls them with [`TileGrid::drain_events`](crate::map::TileGrid::drain_events).
//! Nothing in the core depends on them being consumed.

/// A change the presentation layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridEvent {
    /// The grid was resized; all passability edits were discarded.
    SizeChanged {
        /// New width in tiles.
        width: usize,
        /// New height in tiles.
        height: usize,
    },
    /// Tile state, the anchor or the highlighted tile changed.
    RepaintNeeded,
}

impl std::fmt::Display for GridEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridEvent::SizeChanged { width, height } => write!(f, "SizeChanged({}x{})", width, height),
            GridEvent::RepaintNeeded => write!(f, "RepaintNeeded"),
        }
    }
}
