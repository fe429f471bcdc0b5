use rand::Rng;
use tilescan_grid::{GridError, PixelPoint, TileGrid};

fn main() {
    let mut rng = rand::rng();
    let mut grid = TileGrid::new(16, 12, 32).unwrap();

    // Simulate random clicks; a tile hit twice flips back
    for _ in 0..200 {
        let pixel = PixelPoint::new(rng.random_range(0.0..512.0), rng.random_range(0.0..384.0));
        let _ = grid.toggle_passable(pixel);
    }

    println!("Grid after random toggles ({} blocked):", grid.blocked_count());
    println!("{}", grid);

    for _ in 0..5 {
        let pixel = PixelPoint::new(rng.random_range(-64.0..576.0), rng.random_range(-64.0..448.0));
        match grid.place_anchor(pixel) {
            Ok(closest) => println!(
                "Pixel ({:.1}, {:.1}) -> anchor {} -> closest {}",
                pixel.x,
                pixel.y,
                grid.anchor(),
                closest
            ),
            Err(GridError::OutOfBounds { x, y }) => {
                println!("Pixel ({:.1}, {:.1}) -> tile ({}, {}) is off the grid", pixel.x, pixel.y, x, y)
            }
            Err(e) => println!("Pixel ({:.1}, {:.1}) -> {}", pixel.x, pixel.y, e),
        }
    }

    println!("\nFinal grid:");
    println!("{}", grid);
}
