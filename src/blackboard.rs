use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

use tilescan_grid::{CommandOutcome, GridCommand, GridError, GridEvent, TileGrid};

use crate::bus::Topic;

/// The one grid shared between the console and the event listener.
/// Every mutation takes the write lock, so commands are serialized.
pub type Blackboard = Arc<RwLock<TileGrid>>;

pub fn new_blackboard(grid: TileGrid) -> Blackboard {
    Arc::new(RwLock::new(grid))
}

pub fn snapshot(bb: &Blackboard) -> TileGrid {
    (*bb.read()).clone()
}

/// Applies `command` and publishes the notifications it raised.
///
/// Mutation, search and event draining happen under a single write lock;
/// publishing happens after it is released.
pub fn execute(
    bb: &Blackboard,
    topic: &Topic<GridEvent>,
    command: GridCommand,
) -> Result<CommandOutcome, GridError> {
    let (outcome, events) = {
        let mut grid = bb.write();
        let outcome = grid.apply(command);
        (outcome, grid.drain_events())
    };

    for event in events {
        let receivers = topic.publish(event);
        trace!(%event, receivers, "Published grid event");
    }
    outcome
}
