use reckon_core::{Operation, Tile, TileId};

/// Progress of the move the player is currently building.
///
/// A move is built as: first tile → operation → second tile. The first tile
/// can be replaced until an operation is picked, and the operation can be
/// replaced until the second tile is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    Empty,
    /// The first operand is selected.
    FirstPicked(Tile),
    /// The first operand and the operation are selected.
    FirstAndOperation(Tile, Operation),
}

impl Selection {
    /// Returns the selected first operand.
    #[must_use]
    pub fn first_tile(&self) -> Option<Tile> {
        match self {
            Self::Empty => None,
            Self::FirstPicked(tile) | Self::FirstAndOperation(tile, _) => Some(*tile),
        }
    }

    /// Returns the selected operation.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::FirstAndOperation(_, op) => Some(*op),
            Self::Empty | Self::FirstPicked(_) => None,
        }
    }

    /// Returns whether the tile with `id` is the selected first operand.
    #[must_use]
    pub fn is_selected(&self, id: TileId) -> bool {
        self.first_tile().is_some_and(|tile| tile.id() == id)
    }
}
