use std::{collections::BTreeMap, time::Instant};

use reckon_core::{
    EvalError, Evaluator, GridLayout, Operation, Puzzle, Tile, TileId, TileIdAllocator,
};

use crate::{Hint, History, Selection, SessionError, SessionSettings, Snapshot, hint};

/// A move that was refused because the operation has no valid result.
///
/// The selection that produced it stays visible until
/// [`Session::poll_timers`] observes `clear_at`, or until the player acts
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMove {
    /// First operand.
    pub first: Tile,
    /// Operation that was attempted.
    pub operation: Operation,
    /// Second operand.
    pub second: Tile,
    /// Why the operation failed.
    pub error: EvalError,
    /// When the selection is cleared.
    pub clear_at: Instant,
}

/// A successful reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reduction {
    /// First operand, consumed.
    pub first: Tile,
    /// Operation that was applied.
    pub operation: Operation,
    /// Second operand, consumed.
    pub second: Tile,
    /// Value the operation produced.
    pub value: u64,
    /// Tile holding the result; `None` when the result is 0.
    pub result: Option<Tile>,
}

/// What a tile pick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PickOutcome {
    /// The tile became the first operand.
    Selected(Tile),
    /// The selected first operand was picked again and unselected.
    Deselected,
    /// The tile was the second operand and the move was applied.
    Reduced(Reduction),
    /// The tile was the second operand but the move has no valid result.
    Rejected(InvalidMove),
}

/// A single play-through of a [`Puzzle`].
///
/// The session owns the tiles on the board, the move being built, and the
/// undo history. Moves are built in three picks (tile, operation, tile); the
/// third pick reduces the two tiles into one tile holding the result, placed in
/// the slot of the first operand.
///
/// Whether the puzzle is won is derived from the board on every call to
/// [`Session::is_won`], so undoing a winning move un-wins it.
///
/// # Example
///
/// ```
/// use std::time::Instant;
///
/// use reckon_core::{Evaluator, Operation, Puzzle};
/// use reckon_game::{Session, SessionSettings};
///
/// let puzzle = Puzzle::new(3, &[6, 2, 4]).unwrap();
/// let mut session = Session::new(puzzle, Evaluator::new(), SessionSettings::default());
/// let [six, two, _] = session.tile_ids()[..] else { unreachable!() };
///
/// let now = Instant::now();
/// session.pick_tile(six, now).unwrap();
/// session.pick_operation(Operation::Divide).unwrap();
/// session.pick_tile(two, now).unwrap();
///
/// assert_eq!(session.values(), [3, 4]);
/// assert!(session.is_won());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    evaluator: Evaluator,
    settings: SessionSettings,
    original: Puzzle,
    tiles: BTreeMap<usize, Tile>,
    grid_size: usize,
    selection: Selection,
    history: History,
    ids: TileIdAllocator,
    pending_clear: Option<InvalidMove>,
}

impl Session {
    /// Starts a session on `puzzle`.
    #[must_use]
    pub fn new(puzzle: Puzzle, evaluator: Evaluator, settings: SessionSettings) -> Self {
        let ids = TileIdAllocator::after(puzzle.tiles().iter().map(Tile::id));
        let mut session = Self {
            evaluator,
            settings,
            original: puzzle,
            tiles: BTreeMap::new(),
            grid_size: 0,
            selection: Selection::Empty,
            history: History::new(),
            ids,
            pending_clear: None,
        };
        session.load_original();
        session
    }

    fn load_original(&mut self) {
        self.tiles = self
            .original
            .tiles()
            .iter()
            .map(|tile| (tile.position(), *tile))
            .collect();
        self.grid_size = self.original.tiles().len();
    }

    /// Returns the puzzle this session was started from.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.original
    }

    /// Returns the target value.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.original.target()
    }

    /// Returns the session settings.
    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Iterates over the tiles on the board in slot order.
    pub fn tiles(&self) -> impl ExactSizeIterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Returns the values on the board in slot order.
    #[must_use]
    pub fn values(&self) -> Vec<u64> {
        self.tiles.values().map(Tile::value).collect()
    }

    /// Returns the ids of the tiles on the board in slot order.
    #[must_use]
    pub fn tile_ids(&self) -> Vec<TileId> {
        self.tiles.values().map(Tile::id).collect()
    }

    /// Returns the tile with `id`, if it is on the board.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.values().find(|tile| tile.id() == id)
    }

    /// Returns the tile in display slot `position`, if any.
    #[must_use]
    pub fn tile_at(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Returns the number of tiles on the board.
    #[must_use]
    pub fn remaining_tiles(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the tile count the display grid is sized for.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Returns the tiles mapped onto display slots.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.tiles.values(), self.grid_size)
    }

    /// Returns the move being built.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the rejected move still on display, if any.
    #[must_use]
    pub fn invalid_move(&self) -> Option<&InvalidMove> {
        self.pending_clear.as_ref()
    }

    /// Returns the undo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns whether a reduction can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns whether some tile on the board equals the target.
    #[must_use]
    pub fn is_won(&self) -> bool {
        let target = self.target();
        self.tiles.values().any(|tile| tile.value() == target)
    }

    fn ensure_playable(&self) -> Result<(), SessionError> {
        if self.is_won() {
            return Err(SessionError::PuzzleSolved);
        }
        Ok(())
    }

    fn cancel_pending_clear(&mut self) {
        if let Some(invalid) = self.pending_clear.take() {
            log::trace!(
                "cancelled pending clear of {} {} {}",
                invalid.first,
                invalid.operation,
                invalid.second
            );
        }
    }

    /// Picks a tile.
    ///
    /// - With nothing selected, the tile becomes the first operand.
    /// - With only a first operand selected, the tile replaces it.
    /// - Picking the selected first operand again unselects it.
    /// - With a first operand and an operation selected, the move is applied:
    ///   both tiles are consumed and, unless the result is 0, a tile holding the
    ///   result is placed in the first operand's slot. If the operation has no
    ///   valid result (inexact division) the move is rejected instead; the
    ///   selection stays as it is until `now + invalid_move_delay`, then
    ///   [`Session::poll_timers`] clears it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PuzzleSolved`] if the puzzle is won and
    /// [`SessionError::UnknownTile`] if `id` is not on the board.
    pub fn pick_tile(&mut self, id: TileId, now: Instant) -> Result<PickOutcome, SessionError> {
        self.ensure_playable()?;
        let tile = *self.tile(id).ok_or(SessionError::UnknownTile(id))?;
        self.cancel_pending_clear();

        if self.selection.is_selected(id) {
            self.selection = Selection::Empty;
            return Ok(PickOutcome::Deselected);
        }

        let outcome = match self.selection {
            Selection::Empty | Selection::FirstPicked(_) => {
                self.selection = Selection::FirstPicked(tile);
                PickOutcome::Selected(tile)
            }
            Selection::FirstAndOperation(first, operation) => {
                self.reduce(first, operation, tile, now)
            }
        };
        Ok(outcome)
    }

    fn reduce(
        &mut self,
        first: Tile,
        operation: Operation,
        second: Tile,
        now: Instant,
    ) -> PickOutcome {
        let (a, b) = (first.value(), second.value());
        let evaluated = if operation.is_divide() && !self.evaluator.can_divide(a, b) {
            Err(EvalError::NotDivisible { a, b })
        } else {
            self.evaluator.apply(a, operation, b)
        };

        let value = match evaluated {
            Ok(value) => value,
            Err(error) => {
                let invalid = InvalidMove {
                    first,
                    operation,
                    second,
                    error,
                    clear_at: now + self.settings.invalid_move_delay,
                };
                log::debug!("rejected {a} {operation} {b}: {error}");
                self.pending_clear = Some(invalid);
                return PickOutcome::Rejected(invalid);
            }
        };

        self.history.push(Snapshot {
            tiles: self.tiles.values().copied().collect(),
            grid_size: self.grid_size,
            operand1: first,
            operand2: second,
            operation,
            result: value,
        });
        self.tiles.remove(&first.position());
        self.tiles.remove(&second.position());
        let result = (value > 0).then(|| {
            let tile = Tile::new(self.ids.allocate(), value, first.position());
            self.tiles.insert(tile.position(), tile);
            tile
        });
        self.selection = Selection::Empty;

        log::debug!(
            "reduced {a} {operation} {b} = {value}, {} tiles left",
            self.tiles.len()
        );
        PickOutcome::Reduced(Reduction {
            first,
            operation,
            second,
            value,
            result,
        })
    }

    /// Picks an operation for the selected first operand.
    ///
    /// Replaces any operation picked earlier.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PuzzleSolved`] if the puzzle is won and
    /// [`SessionError::NoTileSelected`] if no first operand is selected.
    pub fn pick_operation(&mut self, operation: Operation) -> Result<Selection, SessionError> {
        self.ensure_playable()?;
        let first = self
            .selection
            .first_tile()
            .ok_or(SessionError::NoTileSelected)?;
        self.cancel_pending_clear();
        self.selection = Selection::FirstAndOperation(first, operation);
        Ok(self.selection)
    }

    /// Discards the move being built. History is left untouched.
    pub fn clear_selection(&mut self) {
        self.cancel_pending_clear();
        self.selection = Selection::Empty;
    }

    /// Reverts the most recent reduction.
    ///
    /// Restores the tiles and grid size saved before it and clears the
    /// selection. Returns `false`, changing nothing, if there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.cancel_pending_clear();
        self.tiles = snapshot
            .tiles
            .iter()
            .map(|tile| (tile.position(), *tile))
            .collect();
        self.grid_size = snapshot.grid_size;
        self.selection = Selection::Empty;
        log::debug!(
            "undid {} {} {} = {}",
            snapshot.operand1,
            snapshot.operation,
            snapshot.operand2,
            snapshot.result
        );
        true
    }

    /// Puts the original tiles back and forgets all history.
    pub fn restart(&mut self) {
        self.cancel_pending_clear();
        self.load_original();
        self.history.reset();
        self.selection = Selection::Empty;
        log::debug!("restarted puzzle with target {}", self.target());
    }

    /// Clears the selection of a rejected move once its delay has passed.
    ///
    /// Returns `true` if the selection was cleared.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        match self.pending_clear {
            Some(invalid) if now >= invalid.clear_at => {
                self.pending_clear = None;
                self.selection = Selection::Empty;
                true
            }
            Some(_) | None => false,
        }
    }

    /// Suggests the move whose result lands closest to the target.
    ///
    /// Does not change the session.
    #[must_use]
    pub fn hint(&self) -> Option<Hint> {
        let tiles: Vec<Tile> = self.tiles.values().copied().collect();
        hint::find_hint(self.evaluator, &tiles, self.target())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use proptest::prelude::*;

    use super::*;

    fn session(target: u64, values: &[u64]) -> Session {
        let puzzle = Puzzle::new(target, values).expect("valid puzzle");
        Session::new(puzzle, Evaluator::new(), SessionSettings::default())
    }

    fn id_at(session: &Session, position: usize) -> TileId {
        session.tile_at(position).expect("tile in slot").id()
    }

    fn play(
        session: &mut Session,
        first: usize,
        operation: Operation,
        second: usize,
        now: Instant,
    ) -> PickOutcome {
        let first = id_at(session, first);
        let second = id_at(session, second);
        session.pick_tile(first, now).unwrap();
        session.pick_operation(operation).unwrap();
        session.pick_tile(second, now).unwrap()
    }

    #[test]
    fn test_new_session_matches_puzzle() {
        let session = session(3, &[6, 2, 4]);
        assert_eq!(session.values(), [6, 2, 4]);
        assert_eq!(session.grid_size(), 3);
        assert_eq!(session.selection(), Selection::Empty);
        assert!(session.history().is_empty());
        assert!(!session.is_won());
    }

    #[test]
    fn test_divide_reaches_target() {
        let mut session = session(3, &[6, 2, 4]);
        let outcome = play(&mut session, 0, Operation::Divide, 1, Instant::now());

        let PickOutcome::Reduced(reduction) = outcome else {
            panic!("expected a reduction, got {outcome:?}");
        };
        assert_eq!(reduction.value, 3);
        assert_eq!(reduction.result.map(|t| t.position()), Some(0));
        assert_eq!(session.values(), [3, 4]);
        assert_eq!(session.tile_at(0).map(Tile::value), Some(3));
        assert!(session.tile_at(1).is_none());
        assert!(session.is_won());
        assert_eq!(session.selection(), Selection::Empty);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_equal_subtraction_leaves_no_tile() {
        let mut session = session(10, &[5, 5]);
        let outcome = play(&mut session, 0, Operation::Subtract, 1, Instant::now());

        assert!(matches!(
            outcome,
            PickOutcome::Reduced(Reduction {
                value: 0,
                result: None,
                ..
            })
        ));
        assert!(session.values().is_empty());
        assert!(!session.is_won());
        assert!(session.hint().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_inexact_division_is_rejected_then_cleared() {
        let mut session = session(7, &[4, 6]);
        let now = Instant::now();
        let outcome = play(&mut session, 0, Operation::Divide, 1, now);

        let PickOutcome::Rejected(invalid) = outcome else {
            panic!("expected a rejection, got {outcome:?}");
        };
        assert_eq!(invalid.error, EvalError::NotDivisible { a: 4, b: 6 });
        assert_eq!(invalid.clear_at, now + Duration::from_millis(600));
        // The failed selection stays visible until the delay has passed.
        assert!(session.selection().is_first_and_operation());
        assert!(session.invalid_move().is_some());
        assert!(!session.poll_timers(now + Duration::from_millis(599)));
        assert!(session.selection().is_first_and_operation());

        assert!(session.poll_timers(now + Duration::from_millis(600)));
        assert_eq!(session.selection(), Selection::Empty);
        assert!(session.invalid_move().is_none());
        assert_eq!(session.values(), [4, 6]);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_new_action_cancels_pending_clear() {
        let mut session = session(7, &[4, 6, 3]);
        let now = Instant::now();
        play(&mut session, 0, Operation::Divide, 1, now);
        assert!(session.invalid_move().is_some());

        // The player changes the operation before the delay elapses.
        session.pick_operation(Operation::Add).unwrap();
        assert!(session.invalid_move().is_none());
        let later = now + Duration::from_secs(5);
        assert!(!session.poll_timers(later));
        assert_eq!(
            session.selection().operation(),
            Some(Operation::Add),
            "newer selection must survive the old timer"
        );

        let outcome = session.pick_tile(id_at(&session, 2), later).unwrap();
        assert!(outcome.is_reduced());
        assert!(session.is_won());
    }

    /// Picks a fresh tile after the rejected move's delay has passed and
    /// checks the stale timer leaves it alone.
    fn assert_timer_cancelled(session: &mut Session, position: usize, now: Instant) {
        assert!(session.invalid_move().is_none());
        let later = now + Duration::from_secs(5);
        let id = id_at(session, position);
        session.pick_tile(id, later).unwrap();
        assert!(!session.poll_timers(later));
        assert!(session.selection().is_selected(id));
    }

    #[test]
    fn test_deselecting_cancels_pending_clear() {
        let mut session = session(7, &[4, 6, 3]);
        let now = Instant::now();
        play(&mut session, 0, Operation::Divide, 1, now);
        assert!(session.invalid_move().is_some());

        let outcome = session.pick_tile(id_at(&session, 0), now).unwrap();
        assert_eq!(outcome, PickOutcome::Deselected);
        assert_timer_cancelled(&mut session, 2, now);
    }

    #[test]
    fn test_clear_selection_cancels_pending_clear() {
        let mut session = session(7, &[4, 6, 3]);
        let now = Instant::now();
        play(&mut session, 0, Operation::Divide, 1, now);
        assert!(session.invalid_move().is_some());

        session.clear_selection();
        assert_timer_cancelled(&mut session, 1, now);
    }

    #[test]
    fn test_undo_cancels_pending_clear() {
        let mut session = session(100, &[2, 3, 4, 6]);
        let now = Instant::now();
        assert!(play(&mut session, 0, Operation::Add, 1, now).is_reduced());
        play(&mut session, 2, Operation::Divide, 3, now);
        assert!(session.invalid_move().is_some());

        assert!(session.undo());
        assert_timer_cancelled(&mut session, 0, now);
    }

    #[test]
    fn test_undo_with_empty_history_keeps_pending_clear() {
        let mut session = session(7, &[4, 6, 3]);
        let now = Instant::now();
        play(&mut session, 0, Operation::Divide, 1, now);

        assert!(!session.undo());
        assert!(session.invalid_move().is_some());
        assert!(session.poll_timers(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_restart_cancels_pending_clear() {
        let mut session = session(100, &[2, 3, 4, 6]);
        let now = Instant::now();
        assert!(play(&mut session, 0, Operation::Add, 1, now).is_reduced());
        play(&mut session, 2, Operation::Divide, 3, now);
        assert!(session.invalid_move().is_some());

        session.restart();
        assert_eq!(session.values(), [2, 3, 4, 6]);
        assert_timer_cancelled(&mut session, 3, now);
    }

    #[test]
    fn test_configured_delay_is_used() {
        let puzzle = Puzzle::new(7, &[4, 6]).unwrap();
        let settings = SessionSettings::default().invalid_move_delay(Duration::from_millis(50));
        let mut session = Session::new(puzzle, Evaluator::new(), settings);
        let now = Instant::now();
        play(&mut session, 0, Operation::Divide, 1, now);
        assert!(session.poll_timers(now + Duration::from_millis(50)));
    }

    #[test]
    fn test_selection_transitions() {
        let mut session = session(100, &[2, 3, 4]);
        let now = Instant::now();
        let [a, b, _] = session.tile_ids()[..] else {
            unreachable!()
        };

        // Empty + pick → FirstPicked
        let outcome = session.pick_tile(a, now).unwrap();
        assert!(matches!(outcome, PickOutcome::Selected(t) if t.id() == a));

        // FirstPicked + pick another → FirstPicked(another)
        session.pick_tile(b, now).unwrap();
        assert!(session.selection().is_selected(b));

        // FirstPicked + op → FirstAndOperation
        session.pick_operation(Operation::Add).unwrap();
        assert_eq!(session.selection().operation(), Some(Operation::Add));

        // FirstAndOperation + op → operation replaced
        session.pick_operation(Operation::Multiply).unwrap();
        assert_eq!(
            session.selection(),
            Selection::FirstAndOperation(*session.tile(b).unwrap(), Operation::Multiply)
        );

        // Clear → Empty, nothing else changes
        session.clear_selection();
        assert_eq!(session.selection(), Selection::Empty);
        assert_eq!(session.values(), [2, 3, 4]);
    }

    #[test]
    fn test_picking_first_tile_again_deselects() {
        let mut session = session(100, &[2, 3]);
        let now = Instant::now();
        let a = id_at(&session, 0);

        session.pick_tile(a, now).unwrap();
        assert_eq!(session.pick_tile(a, now), Ok(PickOutcome::Deselected));
        assert_eq!(session.selection(), Selection::Empty);

        session.pick_tile(a, now).unwrap();
        session.pick_operation(Operation::Add).unwrap();
        assert_eq!(session.pick_tile(a, now), Ok(PickOutcome::Deselected));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_refused_actions_leave_state_untouched() {
        let mut session = session(100, &[2, 3]);
        let now = Instant::now();

        assert_eq!(
            session.pick_operation(Operation::Add),
            Err(SessionError::NoTileSelected)
        );
        assert_eq!(
            session.pick_tile(TileId::new(42), now),
            Err(SessionError::UnknownTile(TileId::new(42)))
        );
        assert_eq!(session.selection(), Selection::Empty);
    }

    #[test]
    fn test_won_puzzle_refuses_further_moves() {
        let mut session = session(5, &[2, 3, 4]);
        let now = Instant::now();
        play(&mut session, 0, Operation::Add, 1, now);
        assert!(session.is_won());

        let tile = id_at(&session, 2);
        assert_eq!(session.pick_tile(tile, now), Err(SessionError::PuzzleSolved));

        assert!(session.undo());
        assert!(!session.is_won());
        assert!(session.pick_tile(tile, now).is_ok());
    }

    #[test]
    fn test_consumed_tile_cannot_be_picked() {
        let mut session = session(100, &[2, 3, 4]);
        let now = Instant::now();
        let consumed = id_at(&session, 1);
        play(&mut session, 0, Operation::Add, 1, now);
        assert_eq!(
            session.pick_tile(consumed, now),
            Err(SessionError::UnknownTile(consumed))
        );
    }

    #[test]
    fn test_result_tiles_get_fresh_ids() {
        let mut session = session(100, &[2, 3, 4]);
        let now = Instant::now();
        let original_ids = session.tile_ids();

        let PickOutcome::Reduced(first) = play(&mut session, 0, Operation::Add, 1, now) else {
            panic!("expected a reduction");
        };
        let first_id = first.result.unwrap().id();
        assert!(!original_ids.contains(&first_id));

        // Ids are not handed out again after an undo or a restart.
        session.undo();
        let PickOutcome::Reduced(second) = play(&mut session, 0, Operation::Add, 1, now) else {
            panic!("expected a reduction");
        };
        assert_ne!(second.result.unwrap().id(), first_id);

        session.restart();
        assert_eq!(session.tile_ids(), original_ids);
    }

    #[test]
    fn test_undo_restores_previous_board() {
        let mut session = session(100, &[6, 2, 4, 3]);
        let now = Instant::now();
        let before: Vec<Tile> = session.tiles().copied().collect();

        play(&mut session, 0, Operation::Multiply, 1, now);
        session.pick_tile(id_at(&session, 2), now).unwrap();

        assert!(session.undo());
        let after: Vec<Tile> = session.tiles().copied().collect();
        assert_eq!(after, before);
        assert_eq!(session.selection(), Selection::Empty);
        assert!(session.history().is_empty());
        assert!(!session.undo());
    }

    #[test]
    fn test_three_undos_restore_original() {
        let mut session = session(1000, &[2, 3, 4, 5]);
        let now = Instant::now();
        let original: Vec<Tile> = session.tiles().copied().collect();

        play(&mut session, 0, Operation::Add, 1, now);
        play(&mut session, 2, Operation::Multiply, 3, now);
        play(&mut session, 0, Operation::Multiply, 2, now);
        assert_eq!(session.values(), [100]);
        assert_eq!(session.history().len(), 3);

        for _ in 0..3 {
            assert!(session.undo());
        }
        let restored: Vec<Tile> = session.tiles().copied().collect();
        assert_eq!(restored, original);
        assert_eq!(session.grid_size(), 4);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut session = session(1000, &[2, 3, 4, 5]);
        let now = Instant::now();
        let original: Vec<Tile> = session.tiles().copied().collect();

        play(&mut session, 0, Operation::Add, 1, now);
        play(&mut session, 2, Operation::Multiply, 3, now);
        session.undo();
        session.pick_tile(id_at(&session, 0), now).unwrap();

        session.restart();
        let once: Vec<Tile> = session.tiles().copied().collect();
        session.restart();
        let twice: Vec<Tile> = session.tiles().copied().collect();

        assert_eq!(once, original);
        assert_eq!(twice, original);
        assert!(session.history().is_empty());
        assert_eq!(session.selection(), Selection::Empty);
    }

    #[test]
    fn test_layout_keeps_slots() {
        let mut session = session(100, &[1, 2, 3, 4, 5]);
        play(&mut session, 3, Operation::Add, 1, Instant::now());
        let layout = session.layout();
        let values: Vec<_> = layout
            .slots()
            .iter()
            .map(|slot| slot.map(|t| t.value()))
            .collect();
        assert_eq!(values, [Some(1), None, Some(3), Some(6), Some(5), None]);
    }

    #[test]
    fn test_hint_does_not_mutate() {
        let mut session = session(3, &[6, 2, 4]);
        session.pick_tile(id_at(&session, 2), Instant::now()).unwrap();
        let before = (session.values(), session.selection(), session.history().len());

        let hint = session.hint().unwrap();
        assert_eq!(hint.to_string(), "6 ÷ 2 = 3");
        assert_eq!(
            (session.values(), session.selection(), session.history().len()),
            before
        );
    }

    #[derive(Debug, Clone)]
    enum Action {
        Pick(usize),
        Operation(usize),
        Clear,
        Undo,
        Restart,
        Wait,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => (0usize..9).prop_map(Action::Pick),
            3 => (0usize..4).prop_map(Action::Operation),
            1 => Just(Action::Clear),
            1 => Just(Action::Undo),
            1 => Just(Action::Restart),
            1 => Just(Action::Wait),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_under_play(
            values in prop::collection::vec(1u64..30, 2..=9),
            target in 1u64..200,
            actions in prop::collection::vec(action(), 0..60),
        ) {
            let mut session = session(target, &values);
            let original: Vec<Tile> = session.tiles().copied().collect();
            let mut now = Instant::now();
            let mut reductions = 0usize;

            for action in actions {
                let before: Vec<Tile> = session.tiles().copied().collect();
                match action {
                    Action::Pick(index) => {
                        let ids = session.tile_ids();
                        if ids.is_empty() {
                            continue;
                        }
                        let id = ids[index % ids.len()];
                        if let Ok(PickOutcome::Reduced(reduction)) = session.pick_tile(id, now) {
                            reductions += 1;
                            let expected = if reduction.value == 0 { 2 } else { 1 };
                            prop_assert_eq!(before.len() - session.remaining_tiles(), expected);

                            // Undo is a left inverse of the reduction.
                            let mut undone = session.clone();
                            prop_assert!(undone.undo());
                            let restored: Vec<Tile> = undone.tiles().copied().collect();
                            prop_assert_eq!(&restored, &before);
                            prop_assert_eq!(undone.selection(), Selection::Empty);
                            prop_assert_eq!(undone.history().len(), reductions - 1);
                        }
                    }
                    Action::Operation(index) => {
                        let _ = session.pick_operation(Operation::ALL[index]);
                    }
                    Action::Clear => session.clear_selection(),
                    Action::Undo => {
                        if session.undo() {
                            reductions -= 1;
                        }
                    }
                    Action::Restart => {
                        session.restart();
                        reductions = 0;
                        let restarted: Vec<Tile> = session.tiles().copied().collect();
                        prop_assert_eq!(&restarted, &original);
                    }
                    Action::Wait => {
                        now += Duration::from_secs(1);
                        session.poll_timers(now);
                    }
                }

                prop_assert_eq!(session.history().len(), reductions);
                prop_assert_eq!(
                    session.is_won(),
                    session.values().contains(&target)
                );
                for tile in session.tiles() {
                    prop_assert_eq!(session.tile_at(tile.position()), Some(tile));
                }
            }
        }
    }
}
