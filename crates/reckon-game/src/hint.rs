//! Greedy single-step hints.
//!
//! A hint looks one move ahead only: it picks the pair of tiles and the
//! operation whose result lands closest to the target. It does not search for
//! a full solution and may point away from one.

use std::fmt::{self, Display};

use reckon_core::{Evaluator, Operation, Tile};

/// A suggested move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    first: Tile,
    second: Tile,
    operation: Operation,
    result: u64,
    distance: u64,
}

impl Hint {
    /// First tile of the suggested pair (earlier slot).
    #[must_use]
    pub fn first(&self) -> Tile {
        self.first
    }

    /// Second tile of the suggested pair (later slot).
    #[must_use]
    pub fn second(&self) -> Tile {
        self.second
    }

    /// Suggested operation.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Value the move produces.
    #[must_use]
    pub fn result(&self) -> u64 {
        self.result
    }

    /// Distance between the result and the target.
    #[must_use]
    pub fn distance(&self) -> u64 {
        self.distance
    }
}

impl Display for Hint {
    /// Formats the move as an equation, e.g. `6 ÷ 2 = 3`.
    ///
    /// Subtraction and division are written larger operand first, matching how
    /// they are evaluated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = (self.first.value(), self.second.value());
        let (lhs, rhs) = match self.operation {
            Operation::Subtract | Operation::Divide => (a.max(b), a.min(b)),
            Operation::Add | Operation::Multiply => (a, b),
        };
        write!(f, "{lhs} {} {rhs} = {}", self.operation, self.result)
    }
}

/// Finds the move whose result is closest to `target`.
///
/// Pairs are scanned in slot order and operations in [`Operation::ALL`] order;
/// on ties the first candidate wins. Divisions that are not exact are skipped.
/// Returns `None` when fewer than two tiles are given.
pub(crate) fn find_hint(evaluator: Evaluator, tiles: &[Tile], target: u64) -> Option<Hint> {
    let mut best: Option<Hint> = None;
    for (i, &first) in tiles.iter().enumerate() {
        for &second in &tiles[i + 1..] {
            for operation in Operation::ALL {
                if operation.is_divide() && !evaluator.can_divide(first.value(), second.value()) {
                    continue;
                }
                let Ok(result) = evaluator.apply(first.value(), operation, second.value()) else {
                    continue;
                };
                let distance = result.abs_diff(target);
                if best.is_none_or(|best| distance < best.distance) {
                    best = Some(Hint {
                        first,
                        second,
                        operation,
                        result,
                        distance,
                    });
                }
            }
        }
    }
    best
}
