use std::{
    cell::RefCell,
    collections::{BTreeSet, VecDeque},
    rc::Rc,
};

use reckon_core::LevelNumber;
use reckon_game::Session;

use crate::{KeyValueStore, ProgressStore, TaskExecutor};

/// Errors from level progression requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProgressionError {
    /// Levels are numbered from 1.
    #[display("{_0} is not a valid level number")]
    InvalidLevel(#[error(not(source))] u32),
    /// A level can only be completed once its puzzle is won.
    #[display("the puzzle has not been solved yet")]
    NotWon,
}

/// Result of completing a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelAdvance {
    /// Level that was completed.
    pub completed: LevelNumber,
    /// Level the player moves to.
    pub next: LevelNumber,
}

#[derive(Debug, Clone, Copy)]
enum ProgressWrite {
    Completed(LevelNumber),
    Current(LevelNumber),
}

impl ProgressWrite {
    async fn apply<S: KeyValueStore>(self, store: &ProgressStore<S>) {
        match self {
            Self::Completed(level) => {
                if let Err(e) = store.add_completed_level(level.get()).await {
                    log::warn!("failed to save level {level} as completed: {e}");
                }
            }
            Self::Current(level) => {
                if let Err(e) = store.set_current_level(level.get()).await {
                    log::warn!("failed to save current level {level}: {e}");
                }
            }
        }
    }
}

/// Writes waiting to be applied, oldest first.
#[derive(Debug, Default)]
struct WriteQueue {
    pending: VecDeque<ProgressWrite>,
    draining: bool,
}

/// Which level the player is on and which levels they have completed.
///
/// Changes apply in memory immediately. Writing them to the store happens on
/// a [`TaskExecutor`]: at most one writer task runs at a time and it applies
/// writes in the order they were requested, so a slow store never sees two
/// read-modify-write cycles interleave. A failed write is only logged.
#[derive(Debug)]
pub struct LevelProgression<S> {
    store: ProgressStore<S>,
    current: LevelNumber,
    completed: BTreeSet<LevelNumber>,
    writes: Rc<RefCell<WriteQueue>>,
}

impl<S> LevelProgression<S>
where
    S: KeyValueStore + Clone + 'static,
{
    /// Reads saved progress from `store`.
    pub async fn load(store: ProgressStore<S>) -> Self {
        let current = LevelNumber::new(store.current_level().await).unwrap_or_default();
        let completed = store
            .completed_levels()
            .await
            .into_iter()
            .filter_map(|level| LevelNumber::new(level).ok())
            .collect();
        log::info!("loaded progress: current level {current}");
        Self {
            store,
            current,
            completed,
            writes: Rc::default(),
        }
    }

    /// Queues `writes` and starts the writer task if none is running.
    ///
    /// The writer lives on `tasks` until the queue is empty.
    fn persist(&self, writes: impl IntoIterator<Item = ProgressWrite>, tasks: &mut TaskExecutor) {
        let mut queue = self.writes.borrow_mut();
        queue.pending.extend(writes);
        if queue.draining {
            return;
        }
        queue.draining = true;
        drop(queue);

        let store = self.store.clone();
        let queue = Rc::clone(&self.writes);
        tasks.spawn(async move {
            loop {
                let next = queue.borrow_mut().pending.pop_front();
                let Some(write) = next else {
                    queue.borrow_mut().draining = false;
                    break;
                };
                write.apply(&store).await;
            }
        });
    }

    /// Returns the number of writes not yet handed to the store.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.borrow().pending.len()
    }

    /// Returns the level the player is on.
    #[must_use]
    pub fn current_level(&self) -> LevelNumber {
        self.current
    }

    /// Returns whether `level` has been completed.
    #[must_use]
    pub fn is_completed(&self, level: LevelNumber) -> bool {
        self.completed.contains(&level)
    }

    /// Iterates over completed levels in ascending order.
    pub fn completed_levels(&self) -> impl DoubleEndedIterator<Item = LevelNumber> {
        self.completed.iter().copied()
    }

    /// Returns the progress store.
    #[must_use]
    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    /// Marks the current level completed and moves to the next one.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::NotWon`] if `session` is not won.
    pub fn complete_level(
        &mut self,
        session: &Session,
        tasks: &mut TaskExecutor,
    ) -> Result<LevelAdvance, ProgressionError> {
        if !session.is_won() {
            return Err(ProgressionError::NotWon);
        }

        let completed = self.current;
        let next = completed.next();
        self.completed.insert(completed);
        self.current = next;
        log::info!("completed level {completed}, moving to level {next}");

        self.persist(
            [
                ProgressWrite::Completed(completed),
                ProgressWrite::Current(next),
            ],
            tasks,
        );

        Ok(LevelAdvance { completed, next })
    }

    /// Moves to `level`.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::InvalidLevel`] if `level` is 0.
    pub fn select_level(
        &mut self,
        level: u32,
        tasks: &mut TaskExecutor,
    ) -> Result<LevelNumber, ProgressionError> {
        let level = LevelNumber::new(level).map_err(|_| ProgressionError::InvalidLevel(level))?;
        self.current = level;
        log::info!("selected level {level}");

        self.persist([ProgressWrite::Current(level)], tasks);
        Ok(level)
    }
}
