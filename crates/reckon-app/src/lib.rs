//! Host-side plumbing for the Reckon game.
//!
//! - [`store`]: asynchronous key-value storage (in memory or on disk).
//! - [`ProgressStore`]: the player's progress on top of a store.
//! - [`LevelProgression`]: current and completed levels, saved in the background.
//! - [`TaskExecutor`]: the poll-driven executor those saves run on.
//! - [`GameController`]: ties a level's session to progression for hosts.
//! - [`AppConfig`]: command-line configuration of the terminal game.

mod config;
mod controller;
mod progress;
mod progression;
pub mod store;
mod task;

pub use self::{
    config::AppConfig,
    controller::GameController,
    progress::ProgressStore,
    progression::{LevelAdvance, LevelProgression, ProgressionError},
    store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreFuture},
    task::{TaskExecutor, block_on},
};
