#![warn(missing_docs)]

use tracing::{debug, trace};

use super::{PixelPoint, TilePoint};
use crate::error::GridError;
use crate::events::GridEvent;
use crate::search::{Passability, ProximitySearch};

/// Pixels per tile edge when nothing else is configured.
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Largest accepted width or height. Keeps every spiral coordinate
/// comfortably inside `i32`.
pub const MAX_DIMENSION: usize = i32::MAX as usize / 4;

const DEFAULT_WIDTH: usize = 10;
const DEFAULT_HEIGHT: usize = 10;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Whether the tile can be stood on.
    pub passable: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Tile { passable: true }
    }
}

/// A 2D grid of tiles with an anchor tile and the cached result of the
/// last proximity search from that anchor.
///
/// Tiles are stored row-major; tile `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTileGrid"))]
pub struct TileGrid {
    /// Width of the grid in tiles
    width: usize,
    /// Height of the grid in tiles
    height: usize,
    /// Edge length of a tile in pixels
    tile_size: u32,
    /// Vector storing the state of each tile
    tiles: Vec<Tile>,
    /// Anchor tile, always within bounds
    anchor: TilePoint,
    /// Last successful search result
    closest: Option<TilePoint>,
    #[cfg_attr(feature = "serde", serde(skip))]
    events: Vec<GridEvent>,
}

impl TileGrid {
    /// Creates a new grid with every tile passable and the anchor at `(0, 0)`.
    ///
    /// # Arguments
    /// * `width` - Width of the grid in tiles
    /// * `height` - Height of the grid in tiles
    /// * `tile_size` - Edge length of a tile in pixels
    ///
    /// # Returns
    /// * `Result<Self, GridError>` - The created grid or an error if parameters are invalid
    pub fn new(width: usize, height: usize, tile_size: u32) -> Result<Self, GridError> {
        Self::with_blocked(width, height, tile_size, &[])
    }

    /// Creates a new grid where the listed tiles start out non-passable.
    ///
    /// # Arguments
    /// * `width` - Width of the grid in tiles
    /// * `height` - Height of the grid in tiles
    /// * `tile_size` - Edge length of a tile in pixels
    /// * `blocked` - Tiles to mark non-passable; every one must be in bounds
    pub fn with_blocked(
        width: usize,
        height: usize,
        tile_size: u32,
        blocked: &[TilePoint],
    ) -> Result<Self, GridError> {
        validate_dimensions(width, height)?;
        if tile_size == 0 {
            return Err(GridError::InvalidTileSize(tile_size));
        }

        let mut grid = TileGrid {
            width,
            height,
            tile_size,
            tiles: vec![Tile::default(); width * height],
            anchor: TilePoint::new(0, 0),
            closest: None,
            events: Vec::new(),
        };
        for &p in blocked {
            let index = grid.tile_index(p)?;
            grid.tiles[index].passable = false;
        }

        if let Err(e) = grid.refresh_closest() {
            debug!(error = %e, "New grid has no passable tile near the anchor");
        }
        // Construction is not a change anyone needs to hear about.
        grid.events.clear();
        Ok(grid)
    }

    /// Width and height in tiles.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Width of the grid in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Edge length of a tile in pixels. Fixed for the lifetime of the grid.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// The anchor tile.
    pub fn anchor(&self) -> TilePoint {
        self.anchor
    }

    /// Result of the last successful search from the anchor, if any.
    pub fn closest(&self) -> Option<TilePoint> {
        self.closest
    }

    /// Read-only view of all tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of non-passable tiles.
    pub fn blocked_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.passable).count()
    }

    /// Checks whether a tile coordinate lies inside the grid.
    pub fn is_within_bounds(&self, p: TilePoint) -> bool {
        self.contains(p)
    }

    /// Clamps each axis of `p` independently into the grid.
    pub fn clamp(&self, p: TilePoint) -> TilePoint {
        TilePoint::new(
            p.x.clamp(0, self.width as i32 - 1),
            p.y.clamp(0, self.height as i32 - 1),
        )
    }

    /// Converts pixel coordinates to tile coordinates by floor-dividing each
    /// axis by the tile size. The result may lie outside the grid.
    ///
    /// # Returns
    /// * `Result<TilePoint, GridError>` - The tile, or `NonFinitePixel` if
    ///   either axis is NaN or infinite
    pub fn pixel_to_tile(&self, pixel: PixelPoint) -> Result<TilePoint, GridError> {
        if !pixel.x.is_finite() || !pixel.y.is_finite() {
            return Err(GridError::NonFinitePixel);
        }
        // Huge finite values saturate far outside any valid grid.
        let size = f64::from(self.tile_size);
        Ok(TilePoint::new(
            (pixel.x / size).floor() as i32,
            (pixel.y / size).floor() as i32,
        ))
    }

    /// Calculates the index in the tile vector for a given tile.
    ///
    /// # Returns
    /// * `Result<usize, GridError>` - `y * width + x`, or `OutOfBounds`
    pub fn tile_index(&self, p: TilePoint) -> Result<usize, GridError> {
        if self.is_within_bounds(p) {
            Ok(p.y as usize * self.width + p.x as usize)
        } else {
            Err(GridError::out_of_bounds(p))
        }
    }

    /// Gets the tile at a tile coordinate.
    pub fn tile(&self, p: TilePoint) -> Result<&Tile, GridError> {
        let index = self.tile_index(p)?;
        Ok(&self.tiles[index])
    }

    /// Whether the tile at `p` is passable.
    ///
    /// # Returns
    /// * `Result<bool, GridError>` - Passability, or `OutOfBounds`
    pub fn is_passable(&self, p: TilePoint) -> Result<bool, GridError> {
        self.tile(p).map(|t| t.passable)
    }

    /// Sets the passability of a tile directly.
    ///
    /// Unlike [`toggle_passable`](Self::toggle_passable) this works in tile
    /// space and does not protect the anchor. The cached search result is
    /// left alone.
    pub fn set_passable(&mut self, p: TilePoint, passable: bool) -> Result<(), GridError> {
        let index = self.tile_index(p)?;
        if self.tiles[index].passable != passable {
            self.tiles[index].passable = passable;
            self.events.push(GridEvent::RepaintNeeded);
        }
        Ok(())
    }

    /// Flips the passability of the tile under a pixel coordinate.
    ///
    /// # Arguments
    /// * `pixel` - Point in pixel space
    ///
    /// # Returns
    /// * `Result<bool, GridError>` - The tile's new passability,
    ///   `NonFinitePixel` or `OutOfBounds` if the pixel names no tile of the
    ///   grid, or `AnchorProtected` if it maps onto the anchor. Errors leave
    ///   the grid untouched.
    pub fn toggle_passable(&mut self, pixel: PixelPoint) -> Result<bool, GridError> {
        let p = self.pixel_to_tile(pixel)?;
        let index = self.tile_index(p)?;
        if p == self.anchor {
            return Err(GridError::AnchorProtected { x: p.x, y: p.y });
        }

        let tile = &mut self.tiles[index];
        tile.passable = !tile.passable;
        let passable = tile.passable;
        trace!(tile = %p, passable, "Toggled tile");
        self.events.push(GridEvent::RepaintNeeded);
        Ok(passable)
    }

    /// Resizes the grid.
    ///
    /// Every tile is reset to passable, so all edits are discarded. The anchor
    /// is clamped into the new bounds and the closest tile recomputed.
    ///
    /// # Returns
    /// * `Result<bool, GridError>` - `true` if the size changed, `false` if it
    ///   already matched, or `InvalidDimensions`
    pub fn resize(&mut self, width: usize, height: usize) -> Result<bool, GridError> {
        validate_dimensions(width, height)?;
        if width == self.width && height == self.height {
            return Ok(false);
        }

        self.width = width;
        self.height = height;
        self.tiles.clear();
        self.tiles.resize(width * height, Tile::default());
        self.anchor = self.clamp(self.anchor);
        debug!(width, height, anchor = %self.anchor, "Resized grid");

        if let Err(e) = self.refresh_closest() {
            debug!(error = %e, "No closest tile after resize");
        }
        self.events.push(GridEvent::SizeChanged { width, height });
        self.events.push(GridEvent::RepaintNeeded);
        Ok(true)
    }

    /// Moves the anchor to the tile under a pixel coordinate and refreshes
    /// the closest tile.
    ///
    /// A pixel outside the grid is rejected with `OutOfBounds`, a NaN or
    /// infinite one with `NonFinitePixel`; neither changes anything.
    ///
    /// # Returns
    /// * `Result<TilePoint, GridError>` - The new closest tile, or the search error
    pub fn place_anchor(&mut self, pixel: PixelPoint) -> Result<TilePoint, GridError> {
        let p = self.pixel_to_tile(pixel)?;
        if !self.is_within_bounds(p) {
            return Err(GridError::out_of_bounds(p));
        }
        self.set_anchor(p)
    }

    /// Moves the anchor to `p`, clamped into bounds, and refreshes the
    /// closest tile.
    pub fn set_anchor(&mut self, p: TilePoint) -> Result<TilePoint, GridError> {
        let anchor = self.clamp(p);
        if anchor != self.anchor {
            self.anchor = anchor;
            self.events.push(GridEvent::RepaintNeeded);
        }
        self.refresh_closest()
    }

    /// Runs the proximity search from the anchor and caches the result.
    ///
    /// On failure the previously cached result is kept.
    pub fn refresh_closest(&mut self) -> Result<TilePoint, GridError> {
        let found = ProximitySearch::find_closest(&*self, self.anchor)?;
        if self.closest != Some(found) {
            self.closest = Some(found);
            self.events.push(GridEvent::RepaintNeeded);
        }
        Ok(found)
    }

    /// Notifications queued since the last drain.
    pub fn pending_events(&self) -> &[GridEvent] {
        &self.events
    }

    /// Takes all queued notifications.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        TileGrid {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            tiles: vec![Tile::default(); DEFAULT_WIDTH * DEFAULT_HEIGHT],
            anchor: TilePoint::new(0, 0),
            closest: Some(TilePoint::new(0, 0)),
            events: Vec::new(),
        }
    }
}

impl Passability for TileGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn is_passable_at(&self, p: TilePoint) -> bool {
        self.tile(p).is_ok_and(|t| t.passable)
    }
}

/// Serialized form of a [`TileGrid`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTileGrid {
    width: usize,
    height: usize,
    tile_size: u32,
    tiles: Vec<Tile>,
    anchor: TilePoint,
    closest: Option<TilePoint>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileGrid> for TileGrid {
    type Error = GridError;

    fn try_from(raw: RawTileGrid) -> Result<Self, Self::Error> {
        validate_dimensions(raw.width, raw.height)?;
        if raw.tile_size == 0 {
            return Err(GridError::InvalidTileSize(raw.tile_size));
        }
        let expected = raw.width * raw.height;
        if raw.tiles.len() != expected {
            return Err(GridError::TileCountMismatch {
                expected,
                actual: raw.tiles.len(),
            });
        }

        let grid = TileGrid {
            width: raw.width,
            height: raw.height,
            tile_size: raw.tile_size,
            tiles: raw.tiles,
            anchor: raw.anchor,
            closest: raw.closest,
            events: Vec::new(),
        };
        if !grid.is_within_bounds(grid.anchor) {
            return Err(GridError::out_of_bounds(grid.anchor));
        }
        if let Some(c) = grid.closest.filter(|c| !grid.is_within_bounds(*c)) {
            return Err(GridError::out_of_bounds(c));
        }
        Ok(grid)
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(GridError::InvalidDimensions { width, height });
    }
    // Check for potential overflow in tile allocation
    if width.checked_mul(height).is_none() {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok(())
}

impl std::fmt::Display for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "TileGrid ({}x{}, tile size: {}px)",
            self.width, self.height, self.tile_size
        )?;
        match self.closest {
            Some(c) => writeln!(f, "Anchor: {}  Closest: {}", self.anchor, c)?,
            None => writeln!(f, "Anchor: {}  Closest: none", self.anchor)?,
        }

        for (i, tile) in self.tiles.iter().enumerate() {
            let p = TilePoint::new((i % self.width) as i32, (i / self.width) as i32);
            let c = if p == self.anchor {
                'A'
            } else if Some(p) == self.closest {
                '*'
            } else if tile.passable {
                '.'
            } else {
                '#'
            };
            write!(f, "{}", c)?;
            if (i + 1) % self.width == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
