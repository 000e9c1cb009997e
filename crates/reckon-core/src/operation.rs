//! Arithmetic operations.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// One of the four operations a player can apply to two tiles.
///
/// # Examples
///
/// ```
/// use reckon_core::Operation;
///
/// assert_eq!(Operation::Multiply.symbol(), "×");
/// assert_eq!(Operation::Divide.to_string(), "÷");
/// assert_eq!("-".parse::<Operation>(), Ok(Operation::Subtract));
///
/// // Iteration order is the order hints are searched in.
/// assert_eq!(Operation::ALL[0], Operation::Add);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Operation {
    /// Addition.
    Add,
    /// Absolute difference.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Exact division of the larger operand by the smaller one.
    Divide,
}

impl Operation {
    /// All operations, in add, subtract, multiply, divide order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the display symbol of the operation.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a string does not name an operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown operation: {input:?}")]
pub struct ParseOperationError {
    #[error(not(source))]
    input: String,
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    /// Accepts the display symbols as well as their ASCII stand-ins.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Self::Add),
            "-" | "−" => Ok(Self::Subtract),
            "*" | "x" | "×" => Ok(Self::Multiply),
            "/" | "÷" => Ok(Self::Divide),
            other => Err(ParseOperationError {
                input: other.to_owned(),
            }),
        }
    }
}
