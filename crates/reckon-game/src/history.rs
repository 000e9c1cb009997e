use reckon_core::{Operation, Tile};

/// Board state saved before a reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub(crate) tiles: Vec<Tile>,
    pub(crate) grid_size: usize,
    pub(crate) operand1: Tile,
    pub(crate) operand2: Tile,
    pub(crate) operation: Operation,
    pub(crate) result: u64,
}

impl Snapshot {
    /// Tiles on the board before the reduction, in slot order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Grid size before the reduction.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// First operand of the reduction.
    #[must_use]
    pub fn operand1(&self) -> Tile {
        self.operand1
    }

    /// Second operand of the reduction.
    #[must_use]
    pub fn operand2(&self) -> Tile {
        self.operand2
    }

    /// Operation that was applied.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Value the reduction produced.
    #[must_use]
    pub fn result(&self) -> u64 {
        self.result
    }
}

/// Undo history of a session: one snapshot per successful reduction.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    pub(crate) fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop()
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
    }

    /// Returns whether there is a reduction to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Returns the number of recorded reductions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no reduction has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Iterates over snapshots, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Snapshot> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use reckon_core::TileId;

    use super::*;

    fn snapshot(result: u64) -> Snapshot {
        let a = Tile::new(TileId::new(0), 1, 0);
        let b = Tile::new(TileId::new(1), 2, 1);
        Snapshot {
            tiles: vec![a, b],
            grid_size: 2,
            operand1: a,
            operand2: b,
            operation: Operation::Add,
            result,
        }
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new();
        history.push(snapshot(1));
        history.push(snapshot(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(Snapshot::result), Some(2));
        assert_eq!(history.pop().map(|s| s.result()), Some(2));
        assert_eq!(history.pop().map(|s| s.result()), Some(1));
        assert!(history.pop().is_none());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset_clears_entries() {
        let mut history = History::new();
        history.push(snapshot(1));
        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.entries().count(), 0);
    }
}
