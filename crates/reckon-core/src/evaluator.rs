//! Game semantics for combining two values.
//!
//! The rules differ from plain integer arithmetic in two places:
//!
//! - subtraction yields the absolute difference, so it never goes negative;
//! - division is only defined when the larger operand is an exact multiple of
//!   the smaller one, and always divides the larger by the smaller.
//!
//! Both rules make the result independent of operand order for subtraction and
//! division.

use crate::Operation;

/// Reasons an operation cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EvalError {
    /// The larger operand is not a multiple of the smaller one.
    #[display("{a} and {b} do not divide evenly")]
    NotDivisible {
        /// First operand.
        a: u64,
        /// Second operand.
        b: u64,
    },
    /// One of the division operands is zero.
    #[display("division by zero")]
    DivisionByZero,
    /// The result does not fit in a tile value.
    #[display("{a} {op} {b} overflows")]
    Overflow {
        /// First operand.
        a: u64,
        /// Operation that overflowed.
        op: Operation,
        /// Second operand.
        b: u64,
    },
}

/// Applies operations with game semantics.
///
/// The evaluator carries no state; sessions receive one explicitly instead of
/// reaching for a shared instance.
///
/// # Examples
///
/// ```
/// use reckon_core::{EvalError, Evaluator, Operation};
///
/// let evaluator = Evaluator::new();
/// assert_eq!(evaluator.apply(3, Operation::Subtract, 8), Ok(5));
/// assert_eq!(evaluator.apply(2, Operation::Divide, 8), Ok(4));
/// assert!(!evaluator.can_divide(4, 6));
/// assert_eq!(
///     evaluator.apply(4, Operation::Divide, 6),
///     Err(EvalError::NotDivisible { a: 4, b: 6 })
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator;

impl Evaluator {
    /// Creates an evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Combines `a` and `b` with `op`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NotDivisible`] or [`EvalError::DivisionByZero`] for a
    /// division that does not yield an exact integer, and
    /// [`EvalError::Overflow`] when the result exceeds `u64::MAX`.
    pub fn apply(self, a: u64, op: Operation, b: u64) -> Result<u64, EvalError> {
        match op {
            Operation::Add => a.checked_add(b).ok_or(EvalError::Overflow { a, op, b }),
            Operation::Subtract => Ok(a.abs_diff(b)),
            Operation::Multiply => a.checked_mul(b).ok_or(EvalError::Overflow { a, op, b }),
            Operation::Divide => {
                let (lo, hi) = (a.min(b), a.max(b));
                if lo == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                if hi % lo != 0 {
                    return Err(EvalError::NotDivisible { a, b });
                }
                Ok(hi / lo)
            }
        }
    }

    /// Returns whether dividing `a` and `b` yields an exact integer.
    ///
    /// Operand order does not matter.
    #[must_use]
    pub fn can_divide(self, a: u64, b: u64) -> bool {
        let (lo, hi) = (a.min(b), a.max(b));
        lo != 0 && hi % lo == 0
    }

    /// Returns the display symbol for `op`.
    #[must_use]
    pub const fn symbol_of(self, op: Operation) -> &'static str {
        op.symbol()
    }
}
