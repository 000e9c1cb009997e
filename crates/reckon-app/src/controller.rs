use std::time::Instant;

use reckon_core::{Evaluator, LevelNumber, Operation, TileId};
use reckon_game::{Hint, PickOutcome, Selection, Session, SessionError, SessionSettings};
use reckon_levels::PuzzleResolver;

use crate::{KeyValueStore, LevelAdvance, LevelProgression, ProgressionError, TaskExecutor};

/// Host-facing game state: the current level's session plus progression.
///
/// Hosts forward player input to the controller and call
/// [`GameController::tick`] on every iteration of their loop.
#[derive(Debug)]
pub struct GameController<S> {
    resolver: PuzzleResolver,
    evaluator: Evaluator,
    settings: SessionSettings,
    progression: LevelProgression<S>,
    session: Session,
    tasks: TaskExecutor,
}

impl<S> GameController<S>
where
    S: KeyValueStore + Clone + 'static,
{
    /// Starts on the progression's current level.
    #[must_use]
    pub fn new(
        resolver: PuzzleResolver,
        progression: LevelProgression<S>,
        settings: SessionSettings,
    ) -> Self {
        let evaluator = Evaluator::new();
        let session = Session::new(
            resolver.resolve(progression.current_level()),
            evaluator,
            settings,
        );
        Self {
            resolver,
            evaluator,
            settings,
            progression,
            session,
            tasks: TaskExecutor::new(),
        }
    }

    fn start_level(&mut self, level: LevelNumber) {
        self.session = Session::new(self.resolver.resolve(level), self.evaluator, self.settings);
    }

    /// Returns the level being played.
    #[must_use]
    pub fn level(&self) -> LevelNumber {
        self.progression.current_level()
    }

    /// Returns the session of the level being played.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the level progression.
    #[must_use]
    pub fn progression(&self) -> &LevelProgression<S> {
        &self.progression
    }

    /// Returns the puzzle resolver.
    #[must_use]
    pub fn resolver(&self) -> &PuzzleResolver {
        &self.resolver
    }

    /// Returns the number of persistence tasks still running.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// See [`Session::pick_tile`].
    ///
    /// # Errors
    ///
    /// Returns the session's refusal.
    pub fn pick_tile(&mut self, id: TileId, now: Instant) -> Result<PickOutcome, SessionError> {
        self.session.pick_tile(id, now)
    }

    /// See [`Session::pick_operation`].
    ///
    /// # Errors
    ///
    /// Returns the session's refusal.
    pub fn pick_operation(&mut self, operation: Operation) -> Result<Selection, SessionError> {
        self.session.pick_operation(operation)
    }

    /// See [`Session::clear_selection`].
    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// See [`Session::undo`].
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// See [`Session::restart`].
    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// See [`Session::hint`].
    #[must_use]
    pub fn hint(&self) -> Option<Hint> {
        self.session.hint()
    }

    /// Completes the won level and starts the next one.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::NotWon`] if the puzzle is not solved.
    pub fn confirm_win(&mut self) -> Result<LevelAdvance, ProgressionError> {
        let advance = self
            .progression
            .complete_level(&self.session, &mut self.tasks)?;
        self.start_level(advance.next);
        Ok(advance)
    }

    /// Jumps to `level` and starts it.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::InvalidLevel`] if `level` is 0.
    pub fn select_level(&mut self, level: u32) -> Result<LevelNumber, ProgressionError> {
        let level = self.progression.select_level(level, &mut self.tasks)?;
        self.start_level(level);
        Ok(level)
    }

    /// Advances background work and session timers.
    ///
    /// Returns `true` if a rejected move was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.tasks.poll();
        self.session.poll_timers(now)
    }

    /// Waits for all pending persistence to finish.
    pub fn flush(&mut self) {
        if !self.tasks.is_idle() {
            log::debug!("waiting for {} pending writes", self.tasks.len());
        }
        self.tasks.run_until_idle();
    }
}
