//! Core data structures for the Reckon arithmetic puzzle.
//!
//! This crate provides the fundamental types shared by level resolution, the
//! game session, and the host application.
//!
//! # Overview
//!
//! 1. **Board types**
//!    - [`tile`]: numbered tiles with stable identity and display slot
//!    - [`puzzle`]: an immutable target + initial tiles
//!    - [`level`]: positive level numbers
//!
//! 2. **Arithmetic**
//!    - [`operation`]: the four operations and their display symbols
//!    - [`evaluator`]: game semantics for combining two values
//!
//! 3. **Presentation helpers**
//!    - [`layout`]: grid shape and slot mapping for rendering tiles
//!
//! # Examples
//!
//! ```
//! use reckon_core::{Evaluator, Operation, Puzzle};
//!
//! let puzzle = Puzzle::new(3, &[6, 2, 4]).unwrap();
//! assert_eq!(puzzle.tiles().len(), 3);
//!
//! let evaluator = Evaluator::new();
//! assert_eq!(evaluator.apply(6, Operation::Divide, 2), Ok(3));
//! assert_eq!(evaluator.apply(2, Operation::Subtract, 6), Ok(4));
//! ```

pub mod evaluator;
pub mod layout;
pub mod level;
pub mod operation;
pub mod puzzle;
pub mod tile;

pub use self::{
    evaluator::{EvalError, Evaluator},
    layout::{GridLayout, GridShape, MAX_GRID_SIZE},
    level::{LevelNumber, LevelNumberError},
    operation::{Operation, ParseOperationError},
    puzzle::{Puzzle, PuzzleError},
    tile::{Tile, TileId, TileIdAllocator},
};
