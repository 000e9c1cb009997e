//! Level content and puzzle resolution for Reckon.
//!
//! [`LevelCatalog`] holds authored levels, parsed and validated once when the
//! game starts. [`PuzzleResolver`] turns a level number into a
//! [`Puzzle`](reckon_core::Puzzle), falling back to a generated puzzle for
//! levels that have no authored content.

pub mod catalog;
pub mod resolver;

pub use self::{
    catalog::{LevelCatalog, LevelData, LevelDataError},
    resolver::{PuzzleResolver, fallback_puzzle},
};
