//! Game session management for Reckon.
//!
//! A [`Session`] is one play-through of a [`Puzzle`](reckon_core::Puzzle):
//! it holds the tiles currently on the board, the move the player is
//! building ([`Selection`]), and the undo [`History`]. Moves reduce two tiles
//! into one; the puzzle is won as soon as any tile equals the target.
//!
//! Rejected moves (inexact division, overflow) are not errors. They come back
//! as [`PickOutcome::Rejected`] and keep the selection on display until the
//! host calls [`Session::poll_timers`] after the configured delay.
//!
//! # Examples
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use reckon_core::{Evaluator, Operation, Puzzle};
//! use reckon_game::{PickOutcome, Session, SessionSettings};
//!
//! let puzzle = Puzzle::new(7, &[4, 6]).unwrap();
//! let mut session = Session::new(puzzle, Evaluator::new(), SessionSettings::default());
//! let ids = session.tile_ids();
//!
//! let now = Instant::now();
//! session.pick_tile(ids[0], now).unwrap();
//! session.pick_operation(Operation::Divide).unwrap();
//! let outcome = session.pick_tile(ids[1], now).unwrap();
//! assert!(outcome.is_rejected());
//!
//! assert!(session.poll_timers(now + Duration::from_secs(1)));
//! assert!(session.selection().is_empty());
//! ```

mod error;
mod hint;
mod history;
mod selection;
mod session;
mod settings;

pub use self::{
    error::SessionError,
    hint::Hint,
    history::{History, Snapshot},
    selection::Selection,
    session::{InvalidMove, PickOutcome, Reduction, Session},
    settings::SessionSettings,
};
