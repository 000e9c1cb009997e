//! Level numbers.

use std::num::NonZero;

/// Error returned when constructing a [`LevelNumber`] from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("level numbers start at 1")]
pub struct LevelNumberError;

/// A level number, starting at 1.
///
/// # Examples
///
/// ```
/// use reckon_core::LevelNumber;
///
/// let level = LevelNumber::new(3).unwrap();
/// assert_eq!(level.get(), 3);
/// assert_eq!(level.next().get(), 4);
/// assert!(LevelNumber::new(0).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("{_0}")]
pub struct LevelNumber(NonZero<u32>);

impl LevelNumber {
    /// The first level.
    pub const FIRST: Self = Self(NonZero::<u32>::MIN);

    /// Creates a level number.
    ///
    /// # Errors
    ///
    /// Returns [`LevelNumberError`] if `n` is zero.
    pub const fn new(n: u32) -> Result<Self, LevelNumberError> {
        match NonZero::new(n) {
            Some(n) => Ok(Self(n)),
            None => Err(LevelNumberError),
        }
    }

    /// Returns the level number as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the following level, saturating at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for LevelNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for LevelNumber {
    type Error = LevelNumberError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<LevelNumber> for u32 {
    fn from(level: LevelNumber) -> Self {
        level.get()
    }
}
