//! Numbered tiles.

use std::fmt::{self, Display};

/// Identity of a tile.
///
/// Ids are handed out by a [`TileIdAllocator`] and never reused within the
/// allocator's lifetime. Two tiles with the same value are still distinct
/// tiles as long as their ids differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u32);

impl TileId {
    /// Creates an id from its raw number.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw number of this id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh [`TileId`]s.
///
/// # Examples
///
/// ```
/// use reckon_core::{TileId, TileIdAllocator};
///
/// let mut ids = TileIdAllocator::new();
/// let a = ids.allocate();
/// let b = ids.allocate();
/// assert_ne!(a, b);
///
/// // Continue after ids that are already in use.
/// let mut ids = TileIdAllocator::after([TileId::new(7), TileId::new(3)]);
/// assert_eq!(ids.allocate(), TileId::new(8));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TileIdAllocator {
    next: u32,
}

impl TileIdAllocator {
    /// Creates an allocator starting at id 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Creates an allocator whose ids are all greater than every id in `used`.
    #[must_use]
    pub fn after(used: impl IntoIterator<Item = TileId>) -> Self {
        let next = used
            .into_iter()
            .map(|id| id.get().saturating_add(1))
            .max()
            .unwrap_or(0);
        Self { next }
    }

    /// Returns a fresh id.
    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A single numbered tile on the board.
///
/// `position` is the display slot the tile was created in. It is kept for as
/// long as the tile lives and is not compacted when other tiles go away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    value: u64,
    position: usize,
}

impl Tile {
    /// Creates a tile.
    #[must_use]
    pub const fn new(id: TileId, value: u64, position: usize) -> Self {
        Self {
            id,
            value,
            position,
        }
    }

    /// Returns the tile's identity.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Returns the tile's value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Returns the display slot of the tile.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = TileIdAllocator::new();
        let allocated: Vec<_> = (0..16).map(|_| ids.allocate()).collect();
        for (i, a) in allocated.iter().enumerate() {
            for b in &allocated[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_allocator_after_empty_starts_at_zero() {
        let mut ids = TileIdAllocator::after([]);
        assert_eq!(ids.allocate(), TileId::new(0));
    }

    #[test]
    fn test_equal_values_are_distinct_tiles() {
        let a = Tile::new(TileId::new(0), 5, 0);
        let b = Tile::new(TileId::new(1), 5, 1);
        assert_eq!(a.value(), b.value());
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "5");
    }
}
