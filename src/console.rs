use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use tilescan_grid::{CommandOutcome, GridCommand, GridError, GridEvent, TileGrid};

use crate::blackboard::{Blackboard, execute, snapshot};
use crate::bus::Topic;

const HELP: &str = "\
commands:
  resize <width> <height>   resize the grid (clears all walls)
  toggle <px> <py>          flip the tile under a pixel
  anchor <px> <py>          move the anchor and find the closest open tile
  show                      print the grid
  help                      print this text
  quit                      exit";

/// Reads commands line by line until EOF or `quit` and applies them to the grid.
///
/// Failed commands are logged and otherwise ignored, the way a click outside
/// the grid would be. Returns the number of commands that succeeded.
pub async fn run_console<R>(reader: R, bb: Blackboard, topic: Topic<GridEvent>) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    info!("Console started. Type `help` for commands.");
    let mut lines = reader.lines();
    let mut applied = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "show" => println!("{}", snapshot(&bb)),
            _ => match line.parse::<GridCommand>() {
                Ok(command) => match execute(&bb, &topic, command) {
                    Ok(outcome) => {
                        applied += 1;
                        report(outcome);
                    }
                    Err(e @ GridError::NoPassableTileFound { .. }) => warn!("{}", e),
                    Err(e) => debug!(error = %e, "Command ignored"),
                },
                Err(e) => warn!("{}", e),
            },
        }
    }

    info!(applied, "Console input closed");
    Ok(applied)
}

fn report(outcome: CommandOutcome) {
    match outcome {
        CommandOutcome::Resized(true) => info!("Grid resized"),
        CommandOutcome::Resized(false) => debug!("Grid already has that size"),
        CommandOutcome::Toggled { tile, passable } => info!(%tile, passable, "Tile toggled"),
        CommandOutcome::AnchorPlaced { anchor, closest } => {
            info!(%anchor, %closest, "Closest available tile")
        }
    }
}

/// Consumes grid events until every publisher is gone.
///
/// Bursts of `RepaintNeeded` are coalesced into a single `render` call.
/// Returns the number of renders.
pub async fn run_event_listener<F>(
    mut rx: broadcast::Receiver<Arc<GridEvent>>,
    bb: Blackboard,
    mut render: F,
) -> usize
where
    F: FnMut(&TileGrid),
{
    info!("Event listener started.");
    let mut renders = 0;

    loop {
        let mut repaint = match rx.recv().await {
            Ok(event) => handle(&event),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!("Event listener lagged by {} events, repainting.", n);
                true
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        // Drain whatever else is already queued before drawing.
        loop {
            match rx.try_recv() {
                Ok(event) => repaint |= handle(&event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => repaint = true,
                Err(_) => break,
            }
        }

        if repaint {
            render(&*bb.read());
            renders += 1;
        }
    }

    info!(renders, "Event listener stopped.");
    renders
}

fn handle(event: &GridEvent) -> bool {
    match event {
        GridEvent::SizeChanged { width, height } => {
            info!(width, height, "Grid size changed");
            false
        }
        GridEvent::RepaintNeeded => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::new_blackboard;
    use tilescan_grid::TilePoint;

    #[tokio::test]
    async fn test_console_applies_commands() {
        let bb = new_blackboard(TileGrid::new(10, 10, 32).unwrap());
        let topic = Topic::new(16);
        let input: &[u8] = b"# set up\nresize 5 4\n\ntoggle 40 40\ntoggle 0 0\nbogus 1 2\nanchor 40 40\nshow\nquit\nresize 9 9\n";

        let applied = run_console(input, bb.clone(), topic).await.unwrap();
        // toggle on the anchor and the unknown verb are ignored; nothing after quit runs
        assert_eq!(applied, 3);

        let grid = snapshot(&bb);
        assert_eq!(grid.dimensions(), (5, 4));
        assert_eq!(grid.is_passable(TilePoint::new(1, 1)), Ok(false));
        assert_eq!(grid.anchor(), TilePoint::new(1, 1));
        assert_eq!(grid.closest(), Some(TilePoint::new(0, 0)));
    }

    #[tokio::test]
    async fn test_listener_renders_until_closed() {
        let bb = new_blackboard(TileGrid::new(4, 4, 10).unwrap());
        let topic = Topic::new(16);
        let rx = topic.subscribe();

        topic.publish(GridEvent::SizeChanged { width: 4, height: 4 });
        topic.publish(GridEvent::RepaintNeeded);
        topic.publish(GridEvent::RepaintNeeded);
        drop(topic);

        let mut seen = Vec::new();
        let renders = run_event_listener(rx, bb, |grid| seen.push(grid.dimensions())).await;
        // All three were queued, so they coalesce into one render
        assert_eq!(renders, 1);
        assert_eq!(seen, vec![(4, 4)]);
    }

    #[tokio::test]
    async fn test_listener_without_repaint_does_not_render() {
        let bb = new_blackboard(TileGrid::new(4, 4, 10).unwrap());
        let topic = Topic::new(4);
        let rx = topic.subscribe();
        topic.publish(GridEvent::SizeChanged { width: 2, height: 2 });
        drop(topic);

        let renders = run_event_listener(rx, bb, |_| panic!("should not render")).await;
        assert_eq!(renders, 0);
    }
}
