use reckon_core::TileId;

/// Reasons a player action is refused.
///
/// A refused action leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// No tile with this id is on the board.
    #[display("no tile {_0} on the board")]
    UnknownTile(#[error(not(source))] TileId),
    /// An operation was picked before a first tile.
    #[display("pick a tile before picking an operation")]
    NoTileSelected,
    /// The target has been reached; only undo, restart and clear are accepted.
    #[display("the puzzle is already solved")]
    PuzzleSolved,
}
