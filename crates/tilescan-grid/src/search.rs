//! Proximity search: the passable tile nearest to a start tile.
//!
//! "Nearest" is defined by a square spiral, not by Euclidean distance. Rings
//! of growing radius are walked around the start tile and the first passable
//! in-bounds tile met wins. Within a ring the walk follows [`EDGE_ORDER`]:
//!
//! ```text
//!   r = 1 around S
//!
//!   1 2 3        top:    left -> right
//!   8 S 4        right:  top -> bottom
//!   7 6 5        bottom: right -> left
//!                left:   bottom -> top
//! ```
//!
//! So a tile directly above the start beats one directly to its right, even
//! though both are one tile away.

#![warn(missing_docs)]

use tracing::{debug, trace};

use crate::error::GridError;
use crate::map::TilePoint;

/// Read access to passability. This is all the search needs from a grid.
pub trait Passability {
    /// Width and height in tiles.
    fn dimensions(&self) -> (usize, usize);

    /// Whether `p` is in bounds and passable. Out-of-bounds tiles are never
    /// passable.
    fn is_passable_at(&self, p: TilePoint) -> bool;

    /// Whether `p` is in bounds.
    fn contains(&self, p: TilePoint) -> bool {
        let (width, height) = self.dimensions();
        p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height
    }
}

/// One side of a spiral ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top row, walked left to right. Owns both top corners.
    Top,
    /// Right column, walked top to bottom. Owns the bottom-right corner.
    Right,
    /// Bottom row, walked right to left. Owns the bottom-left corner.
    Bottom,
    /// Left column, walked bottom to top. Owns no corner.
    Left,
}

/// Order in which the edges of every ring are walked. This is the tie-break
/// policy between tiles on the same ring.
pub const EDGE_ORDER: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

impl Edge {
    /// Tiles of this edge on the ring of `radius` around `center`, in walking
    /// order. Each ring corner belongs to exactly one edge.
    pub fn cells(self, center: TilePoint, radius: i32) -> impl Iterator<Item = TilePoint> {
        let left = center.x - radius;
        let right = center.x + radius;
        let top = center.y - radius;
        let bottom = center.y + radius;

        let (start, step, len) = match self {
            Edge::Top => (TilePoint::new(left, top), TilePoint::new(1, 0), 2 * radius + 1),
            Edge::Right => (TilePoint::new(right, top + 1), TilePoint::new(0, 1), 2 * radius),
            Edge::Bottom => (TilePoint::new(right - 1, bottom), TilePoint::new(-1, 0), 2 * radius),
            Edge::Left => (TilePoint::new(left, bottom - 1), TilePoint::new(0, -1), 2 * radius - 1),
        };

        (0..len.max(0)).map(move |i| TilePoint::new(start.x + step.x * i, start.y + step.y * i))
    }
}

/// The perimeter of the ring of `radius` around `center`, walked in
/// [`EDGE_ORDER`]. Ring `r >= 1` has `8 * r` tiles; ring 0 is the center.
pub fn spiral_ring(center: TilePoint, radius: i32) -> impl Iterator<Item = TilePoint> {
    EDGE_ORDER
        .into_iter()
        .flat_map(move |edge| edge.cells(center, radius))
}

/// Outcome of a search together with how much work it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// The tile found, if any.
    pub found: Option<TilePoint>,
    /// Rings walked. Zero when the start tile itself was passable.
    pub radii_scanned: usize,
    /// Tiles tested, including the start tile and out-of-bounds ones.
    pub cells_visited: usize,
}

/// Stateless nearest-passable-tile search.
pub struct ProximitySearch;

impl ProximitySearch {
    /// Finds the passable tile closest to `start` in spiral order.
    ///
    /// # Arguments
    /// * `grid` - Anything exposing passability
    /// * `start` - Tile to search around; must be in bounds
    ///
    /// # Returns
    /// * `Result<TilePoint, GridError>` - The tile found, `OutOfBounds` if
    ///   `start` is outside the grid, or `NoPassableTileFound` if every ring
    ///   up to `max(width, height)` came up empty
    pub fn find_closest<P: Passability + ?Sized>(
        grid: &P,
        start: TilePoint,
    ) -> Result<TilePoint, GridError> {
        let report = Self::find_closest_with_report(grid, start)?;
        report.found.ok_or(GridError::NoPassableTileFound {
            start,
            radii: report.radii_scanned,
        })
    }

    /// Like [`find_closest`](Self::find_closest) but reports the amount of
    /// work done. Exhaustion is `Ok` with `found: None`.
    pub fn find_closest_with_report<P: Passability + ?Sized>(
        grid: &P,
        start: TilePoint,
    ) -> Result<SearchReport, GridError> {
        if !grid.contains(start) {
            return Err(GridError::out_of_bounds(start));
        }

        let mut report = SearchReport {
            found: None,
            radii_scanned: 0,
            cells_visited: 1,
        };
        if grid.is_passable_at(start) {
            report.found = Some(start);
            return Ok(report);
        }

        let (width, height) = grid.dimensions();
        let max_radius = width.max(height);

        // Rings that fall partly or wholly outside the grid are still walked in full.
        for radius in 1..=max_radius {
            report.radii_scanned = radius;
            trace!(%start, radius, "Scanning ring");
            for p in spiral_ring(start, radius as i32) {
                report.cells_visited += 1;
                if grid.is_passable_at(p) {
                    debug!(%start, found = %p, radius, "Found closest passable tile");
                    report.found = Some(p);
                    return Ok(report);
                }
            }
        }

        debug!(%start, radii = max_radius, "No passable tile found");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileGrid;

    fn blocked_grid(width: usize, height: usize) -> TileGrid {
        let mut grid = TileGrid::new(width, height, 32).unwrap();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                grid.set_passable(TilePoint::new(x, y), false).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_ring_order_radius_one() {
        let ring: Vec<_> = spiral_ring(TilePoint::new(5, 5), 1).collect();
        let expected = vec![
            TilePoint::new(4, 4),
            TilePoint::new(5, 4),
            TilePoint::new(6, 4),
            TilePoint::new(6, 5),
            TilePoint::new(6, 6),
            TilePoint::new(5, 6),
            TilePoint::new(4, 6),
            TilePoint::new(4, 5),
        ];
        assert_eq!(ring, expected);
    }

    #[test]
    fn test_ring_covers_perimeter_once() {
        let center = TilePoint::new(0, 0);
        for radius in 1..6 {
            let ring: Vec<_> = spiral_ring(center, radius).collect();
            assert_eq!(ring.len(), 8 * radius as usize);

            let unique: std::collections::HashSet<_> = ring.iter().copied().collect();
            assert_eq!(unique.len(), ring.len());
            assert!(ring.iter().all(|p| center.ring_distance(*p) == radius as u32));
        }
    }

    #[test]
    fn test_ring_zero_is_center() {
        let ring: Vec<_> = spiral_ring(TilePoint::new(3, 2), 0).collect();
        assert_eq!(ring, vec![TilePoint::new(3, 2)]);
    }

    #[test]
    fn test_passable_start_returns_start() {
        let grid = TileGrid::new(8, 8, 32).unwrap();
        let report = ProximitySearch::find_closest_with_report(&grid, TilePoint::new(3, 6)).unwrap();
        assert_eq!(report.found, Some(TilePoint::new(3, 6)));
        assert_eq!(report.radii_scanned, 0);
        assert_eq!(report.cells_visited, 1);
    }

    #[test]
    fn test_out_of_bounds_start() {
        let grid = TileGrid::new(4, 4, 32).unwrap();
        assert_eq!(
            ProximitySearch::find_closest(&grid, TilePoint::new(4, 1)),
            Err(GridError::OutOfBounds { x: 4, y: 1 })
        );
        assert_eq!(
            ProximitySearch::find_closest(&grid, TilePoint::new(-1, 1)),
            Err(GridError::OutOfBounds { x: -1, y: 1 })
        );
    }

    #[test]
    fn test_top_beats_right() {
        let mut grid = blocked_grid(10, 10);
        grid.set_passable(TilePoint::new(6, 5), true).unwrap();
        grid.set_passable(TilePoint::new(5, 4), true).unwrap();
        assert_eq!(
            ProximitySearch::find_closest(&grid, TilePoint::new(5, 5)),
            Ok(TilePoint::new(5, 4))
        );
    }

    #[test]
    fn test_right_beats_bottom_and_bottom_beats_left() {
        let mut grid = blocked_grid(10, 10);
        grid.set_passable(TilePoint::new(5, 6), true).unwrap();
        grid.set_passable(TilePoint::new(6, 5), true).unwrap();
        grid.set_passable(TilePoint::new(4, 5), true).unwrap();
        let start = TilePoint::new(5, 5);
        assert_eq!(ProximitySearch::find_closest(&grid, start), Ok(TilePoint::new(6, 5)));

        grid.set_passable(TilePoint::new(6, 5), false).unwrap();
        assert_eq!(ProximitySearch::find_closest(&grid, start), Ok(TilePoint::new(5, 6)));

        grid.set_passable(TilePoint::new(5, 6), false).unwrap();
        assert_eq!(ProximitySearch::find_closest(&grid, start), Ok(TilePoint::new(4, 5)));
    }

    #[test]
    fn test_corner_order_not_euclidean() {
        // Top-left corner of ring 1 comes before the tile directly above.
        let mut grid = blocked_grid(10, 10);
        grid.set_passable(TilePoint::new(4, 4), true).unwrap();
        grid.set_passable(TilePoint::new(5, 4), true).unwrap();
        assert_eq!(
            ProximitySearch::find_closest(&grid, TilePoint::new(5, 5)),
            Ok(TilePoint::new(4, 4))
        );
    }

    #[test]
    fn test_smaller_ring_wins() {
        let mut grid = blocked_grid(10, 10);
        grid.set_passable(TilePoint::new(3, 3), true).unwrap();
        grid.set_passable(TilePoint::new(5, 7), true).unwrap();
        // Both on ring 2; the top edge is walked before the bottom edge.
        assert_eq!(
            ProximitySearch::find_closest(&grid, TilePoint::new(5, 5)),
            Ok(TilePoint::new(3, 3))
        );

        grid.set_passable(TilePoint::new(4, 6), true).unwrap();
        assert_eq!(
            ProximitySearch::find_closest(&grid, TilePoint::new(5, 5)),
            Ok(TilePoint::new(4, 6))
        );
    }

    #[test]
    fn test_rings_outside_grid_are_skipped() {
        let mut grid = blocked_grid(6, 6);
        grid.set_passable(TilePoint::new(5, 5), true).unwrap();
        let report = ProximitySearch::find_closest_with_report(&grid, TilePoint::new(0, 0)).unwrap();
        assert_eq!(report.found, Some(TilePoint::new(5, 5)));
        assert_eq!(report.radii_scanned, 5);
    }

    #[test]
    fn test_exhaustion_scans_max_dimension_radii() {
        let grid = blocked_grid(7, 3);
        let start = TilePoint::new(2, 1);
        let report = ProximitySearch::find_closest_with_report(&grid, start).unwrap();
        assert_eq!(report.found, None);
        assert_eq!(report.radii_scanned, 7);
        // Start tile plus 8r tiles for every ring
        assert_eq!(report.cells_visited, 1 + (1..=7).map(|r| 8 * r).sum::<usize>());

        assert_eq!(
            ProximitySearch::find_closest(&grid, start),
            Err(GridError::NoPassableTileFound { start, radii: 7 })
        );
    }

    #[test]
    fn test_single_tile_grid() {
        let grid = blocked_grid(1, 1);
        let report = ProximitySearch::find_closest_with_report(&grid, TilePoint::new(0, 0)).unwrap();
        assert_eq!(report.found, None);
        assert_eq!(report.radii_scanned, 1);
    }
}
