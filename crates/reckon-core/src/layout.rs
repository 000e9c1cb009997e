//! Grid shape and slot mapping for rendering tiles.
//!
//! The grid never reflows: a tile is drawn in the slot it was created in, and
//! slots whose tile has been consumed stay empty.

use crate::Tile;

/// Largest number of tiles a puzzle may start with.
pub const MAX_GRID_SIZE: usize = 9;

/// Column and row count of the display grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl GridShape {
    /// Returns the grid shape for a tile count.
    ///
    /// Up to 4 tiles use 2×2, up to 6 use 3×2, anything larger uses 3×3.
    ///
    /// # Examples
    ///
    /// ```
    /// use reckon_core::GridShape;
    ///
    /// assert_eq!(GridShape::for_tile_count(4), GridShape { cols: 2, rows: 2 });
    /// assert_eq!(GridShape::for_tile_count(5), GridShape { cols: 3, rows: 2 });
    /// assert_eq!(GridShape::for_tile_count(7), GridShape { cols: 3, rows: 3 });
    /// ```
    #[must_use]
    pub const fn for_tile_count(count: usize) -> Self {
        match count {
            0..=4 => Self { cols: 2, rows: 2 },
            5..=6 => Self { cols: 3, rows: 2 },
            _ => Self { cols: 3, rows: 3 },
        }
    }

    /// Returns the number of slots in the grid.
    #[must_use]
    pub const fn slot_count(self) -> usize {
        self.cols * self.rows
    }
}

/// Tiles mapped onto display slots.
///
/// # Examples
///
/// ```
/// use reckon_core::{GridLayout, Puzzle};
///
/// let puzzle = Puzzle::new(10, &[1, 2, 3, 4, 5]).unwrap();
/// let tiles = &puzzle.tiles()[1..]; // the tile in slot 0 was consumed
/// let layout = GridLayout::new(tiles, 5);
///
/// assert_eq!(layout.cols(), 3);
/// assert_eq!(layout.slots().len(), 6);
/// assert!(layout.slots()[0].is_none());
/// assert_eq!(layout.slots()[4].map(|t| t.value()), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    shape: GridShape,
    slots: Vec<Option<Tile>>,
}

impl GridLayout {
    /// Places `tiles` on a grid sized for `initial_tile_count` tiles.
    ///
    /// Columns follow [`GridShape::for_tile_count`]; rows are
    /// `ceil(initial_tile_count / cols)`, except that a two-column grid always
    /// has two rows. Tiles whose position lies outside the grid are left out of
    /// the rendered slots.
    pub fn new<'a>(tiles: impl IntoIterator<Item = &'a Tile>, initial_tile_count: usize) -> Self {
        let cols = GridShape::for_tile_count(initial_tile_count).cols;
        let rows = if cols == 2 {
            2
        } else {
            initial_tile_count.div_ceil(cols)
        };
        let shape = GridShape { cols, rows };

        let mut slots = vec![None; shape.slot_count()];
        for tile in tiles {
            match slots.get_mut(tile.position()) {
                Some(slot) => *slot = Some(*tile),
                None => log::trace!(
                    "tile {} at position {} is outside the {}x{} grid",
                    tile.id(),
                    tile.position(),
                    cols,
                    rows
                ),
            }
        }

        Self { shape, slots }
    }

    /// Returns the grid shape.
    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Returns all slots in row-major order.
    #[must_use]
    pub fn slots(&self) -> &[Option<Tile>] {
        &self.slots
    }

    /// Iterates over the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>]> {
        self.slots.chunks(self.shape.cols)
    }
}
