mod blackboard;   // the shared grid behind a single lock
mod bus;          // broadcast topic for grid events
mod config;       // layered settings
mod console;      // stdin command loop and event listener

use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tilescan_grid::{GridEvent, TileGrid};

use crate::bus::Topic;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the grid dumps on stdout stay readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => config::load_config_from(&path)?,
        None => config::load_config()?,
    };

    let grid = TileGrid::new(settings.grid.width, settings.grid.height, settings.grid.tile_size)
        .context("invalid grid settings")?;
    info!(
        width = grid.width(),
        height = grid.height(),
        tile_size = grid.tile_size(),
        "Tilescan started."
    );

    let bb = blackboard::new_blackboard(grid);
    let topic: Topic<GridEvent> = Topic::new(settings.bus.capacity);

    let listener = tokio::spawn(console::run_event_listener(
        topic.subscribe(),
        Arc::clone(&bb),
        |grid| println!("{}", grid),
    ));

    println!("{}", blackboard::snapshot(&bb));
    // The console owns the last publisher; the listener stops once it returns.
    let applied = console::run_console(BufReader::new(tokio::io::stdin()), bb, topic).await?;
    let renders = listener.await?;

    info!(applied, renders, "Tilescan finished.");
    Ok(())
}
