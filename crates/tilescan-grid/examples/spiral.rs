use tilescan_grid::{PixelPoint, ProximitySearch, TileGrid, TilePoint, spiral_ring};
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=tilescan_grid=trace shows every ring the search walks
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A 10x10 grid with a walled-in room around (5, 5)
    // # = blocked
    let layout = [
        "..........",
        "..........",
        "...#####..",
        "...#####..",
        "...##.##..",
        "...#####..",
        "...#####..",
        "..........",
        "..........",
        "..........",
    ];
    let blocked: Vec<TilePoint> = layout
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|(_, c)| *c == '#')
                .map(move |(x, _)| TilePoint::new(x as i32, y as i32))
        })
        .collect();
    let mut grid = TileGrid::with_blocked(10, 10, 32, &blocked).unwrap();

    println!("Walk order of ring 1 around (5, 5):");
    for (i, p) in spiral_ring(TilePoint::new(5, 5), 1).enumerate() {
        println!("  {}: {}", i + 1, p);
    }

    // Pixel (150, 150) is tile (4, 4), a wall tile inside the room
    match grid.place_anchor(PixelPoint::new(150.0, 150.0)) {
        Ok(closest) => println!("\nAnchor {} -> closest passable tile {}", grid.anchor(), closest),
        Err(e) => println!("\nAnchor placement failed: {}", e),
    }
    println!("{}", grid);

    let report = ProximitySearch::find_closest_with_report(&grid, TilePoint::new(4, 4)).unwrap();
    println!(
        "Search from (4, 4): found {:?} after {} rings, {} tiles tested",
        report.found, report.radii_scanned, report.cells_visited
    );

    // The anchor cannot be toggled
    if let Err(e) = grid.toggle_passable(PixelPoint::new(150.0, 150.0)) {
        println!("Toggle rejected: {}", e);
    }

    // Resizing wipes every wall
    grid.resize(6, 6).unwrap();
    println!("\nAfter resize:");
    println!("{}", grid);
    for event in grid.drain_events() {
        println!("event: {}", event);
    }
}
