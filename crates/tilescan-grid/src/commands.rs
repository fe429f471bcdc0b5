//! Command boundary used by the presentation layer.
//!
//! Commands can be built directly or parsed from a one-line text form:
//!
//! ```text
//! resize <width> <height>
//! toggle <pixel x> <pixel y>
//! anchor <pixel x> <pixel y>
//! ```

use std::str::FromStr;

use tracing::debug;

use crate::error::GridError;
use crate::map::{PixelPoint, TileGrid, TilePoint};

/// A state-changing request against a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridCommand {
    /// Resize the grid, discarding all edits.
    Resize {
        /// New width in tiles.
        width: usize,
        /// New height in tiles.
        height: usize,
    },
    /// Flip passability of the tile under a pixel.
    TogglePassable(PixelPoint),
    /// Move the anchor to the tile under a pixel and search from it.
    PlaceAnchor(PixelPoint),
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `true` if the size actually changed.
    Resized(bool),
    /// The tile that was toggled and its new passability.
    Toggled {
        /// Tile that was flipped.
        tile: TilePoint,
        /// Passability after the flip.
        passable: bool,
    },
    /// The new anchor and the closest passable tile found from it.
    AnchorPlaced {
        /// Anchor after the move.
        anchor: TilePoint,
        /// Closest passable tile.
        closest: TilePoint,
    },
}

impl TileGrid {
    /// Applies a command to the grid.
    ///
    /// Errors are the ones of the underlying operation; a failed command
    /// leaves the grid as that operation documents.
    pub fn apply(&mut self, command: GridCommand) -> Result<CommandOutcome, GridError> {
        debug!(?command, "Applying command");
        match command {
            GridCommand::Resize { width, height } => self.resize(width, height).map(CommandOutcome::Resized),
            GridCommand::TogglePassable(pixel) => {
                let tile = self.pixel_to_tile(pixel)?;
                let passable = self.toggle_passable(pixel)?;
                Ok(CommandOutcome::Toggled { tile, passable })
            }
            GridCommand::PlaceAnchor(pixel) => {
                let closest = self.place_anchor(pixel)?;
                Ok(CommandOutcome::AnchorPlaced {
                    anchor: self.anchor(),
                    closest,
                })
            }
        }
    }
}

impl FromStr for GridCommand {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| GridError::InvalidCommand("empty command".to_string()))?;
        let args: Vec<&str> = parts.collect();
        if args.len() != 2 {
            return Err(GridError::InvalidCommand(format!(
                "`{}` takes 2 arguments, got {}",
                verb,
                args.len()
            )));
        }

        match verb.to_ascii_lowercase().as_str() {
            "resize" => {
                // Negative sizes parse so that `resize` can reject them as dimensions.
                let width = parse_number::<i64>(args[0])?;
                let height = parse_number::<i64>(args[1])?;
                Ok(GridCommand::Resize {
                    width: usize::try_from(width).unwrap_or(0),
                    height: usize::try_from(height).unwrap_or(0),
                })
            }
            "toggle" => Ok(GridCommand::TogglePassable(parse_pixel(&args)?)),
            "anchor" | "place" => Ok(GridCommand::PlaceAnchor(parse_pixel(&args)?)),
            other => Err(GridError::InvalidCommand(format!("unknown command `{}`", other))),
        }
    }
}

fn parse_number<T: FromStr>(arg: &str) -> Result<T, GridError> {
    arg.parse()
        .map_err(|_| GridError::InvalidCommand(format!("`{}` is not a number", arg)))
}

fn parse_pixel(args: &[&str]) -> Result<PixelPoint, GridError> {
    let x: f64 = parse_number(args[0])?;
    let y: f64 = parse_number(args[1])?;
    if !x.is_finite() || !y.is_finite() {
        return Err(GridError::InvalidCommand("pixel coordinates must be finite".to_string()));
    }
    Ok(PixelPoint::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "resize 12 8".parse::<GridCommand>(),
            Ok(GridCommand::Resize { width: 12, height: 8 })
        );
        assert_eq!(
            "  toggle 40.5   70 ".parse::<GridCommand>(),
            Ok(GridCommand::TogglePassable(PixelPoint::new(40.5, 70.0)))
        );
        assert_eq!(
            "ANCHOR -3 100".parse::<GridCommand>(),
            Ok(GridCommand::PlaceAnchor(PixelPoint::new(-3.0, 100.0)))
        );
        assert_eq!(
            "place 1 2".parse::<GridCommand>(),
            Ok(GridCommand::PlaceAnchor(PixelPoint::new(1.0, 2.0)))
        );
    }

    #[test]
    fn test_parse_negative_resize_becomes_zero() {
        assert_eq!(
            "resize -4 3".parse::<GridCommand>(),
            Ok(GridCommand::Resize { width: 0, height: 3 })
        );
    }

    #[test]
    fn test_parse_errors() {
        for line in ["", "resize 3", "toggle a b", "jump 1 2", "anchor 1 2 3", "toggle NaN 1", "resize 1.5 2"] {
            assert!(
                matches!(line.parse::<GridCommand>(), Err(GridError::InvalidCommand(_))),
                "`{}` should not parse",
                line
            );
        }
    }

    #[test]
    fn test_apply_commands() {
        let mut grid = TileGrid::new(4, 4, 10).unwrap();

        assert_eq!(
            grid.apply(GridCommand::TogglePassable(PixelPoint::new(15.0, 5.0))),
            Ok(CommandOutcome::Toggled {
                tile: TilePoint::new(1, 0),
                passable: false
            })
        );
        assert_eq!(
            grid.apply(GridCommand::PlaceAnchor(PixelPoint::new(15.0, 5.0))),
            Ok(CommandOutcome::AnchorPlaced {
                anchor: TilePoint::new(1, 0),
                closest: TilePoint::new(2, 0),
            })
        );
        assert_eq!(
            grid.apply(GridCommand::Resize { width: 4, height: 4 }),
            Ok(CommandOutcome::Resized(false))
        );
        assert_eq!(
            grid.apply(GridCommand::Resize { width: 0, height: 4 }),
            Err(GridError::InvalidDimensions { width: 0, height: 4 })
        );
        assert_eq!(
            grid.apply(GridCommand::Resize { width: 2, height: 2 }),
            Ok(CommandOutcome::Resized(true))
        );
        assert_eq!(grid.is_passable(TilePoint::new(1, 0)), Ok(true));
    }

    #[test]
    fn test_apply_rejects_non_finite_pixels() {
        let mut grid = TileGrid::new(4, 4, 10).unwrap();
        grid.drain_events();

        let pixel = PixelPoint::new(f64::NAN, 5.0);
        assert_eq!(grid.apply(GridCommand::TogglePassable(pixel)), Err(GridError::NonFinitePixel));
        assert_eq!(grid.apply(GridCommand::PlaceAnchor(pixel)), Err(GridError::NonFinitePixel));
        assert_eq!(grid.blocked_count(), 0);
        assert_eq!(grid.anchor(), TilePoint::new(0, 0));
        assert!(grid.pending_events().is_empty());
    }
}
