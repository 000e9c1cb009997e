//! Puzzle definition.

use crate::{MAX_GRID_SIZE, Tile, TileIdAllocator};

/// Reasons a puzzle definition is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    /// The puzzle has no tiles.
    #[display("puzzle has no tiles")]
    NoTiles,
    /// The puzzle has more tiles than the grid can show.
    #[display("puzzle has {count} tiles, at most {} are supported", MAX_GRID_SIZE)]
    TooManyTiles {
        /// Number of tiles requested.
        count: usize,
    },
    /// A tile value is zero.
    #[display("tile {index} has value 0")]
    ZeroValue {
        /// Index of the offending value.
        index: usize,
    },
    /// The target is zero.
    #[display("target must be positive")]
    ZeroTarget,
}

/// A target and the tiles the player starts with.
///
/// Tiles are created in list order: the tile built from `values[i]` sits in
/// slot `i` and has a fresh id.
///
/// # Examples
///
/// ```
/// use reckon_core::Puzzle;
///
/// let puzzle = Puzzle::new(24, &[3, 8, 1]).unwrap();
/// assert_eq!(puzzle.target(), 24);
/// let positions: Vec<_> = puzzle.tiles().iter().map(|t| t.position()).collect();
/// assert_eq!(positions, [0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    target: u64,
    tiles: Vec<Tile>,
}

impl Puzzle {
    /// Builds a puzzle from a target and a list of values.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the list is empty or longer than
    /// [`MAX_GRID_SIZE`], or if the target or any value is zero.
    pub fn new(target: u64, values: &[u64]) -> Result<Self, PuzzleError> {
        if target == 0 {
            return Err(PuzzleError::ZeroTarget);
        }
        if values.is_empty() {
            return Err(PuzzleError::NoTiles);
        }
        if values.len() > MAX_GRID_SIZE {
            return Err(PuzzleError::TooManyTiles {
                count: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|&v| v == 0) {
            return Err(PuzzleError::ZeroValue { index });
        }

        let mut ids = TileIdAllocator::new();
        let tiles = values
            .iter()
            .enumerate()
            .map(|(position, &value)| Tile::new(ids.allocate(), value, position))
            .collect();
        Ok(Self { target, tiles })
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Returns the initial tiles in slot order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the initial tile values in slot order.
    #[must_use]
    pub fn values(&self) -> Vec<u64> {
        self.tiles.iter().map(Tile::value).collect()
    }
}
