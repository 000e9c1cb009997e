//! Level number → puzzle resolution.

use reckon_core::{LevelNumber, Puzzle};

use crate::{LevelCatalog, LevelDataError};

/// Values the fallback puzzle is derived from.
const FALLBACK_BASE: [u64; 4] = [2, 3, 4, 5];

/// Resolves level numbers to puzzles.
///
/// Authored content takes precedence. Levels without authored content get a
/// deterministic fallback puzzle (see [`fallback_puzzle`]) so that progression
/// never runs out of levels.
///
/// # Examples
///
/// ```
/// use reckon_core::LevelNumber;
/// use reckon_levels::PuzzleResolver;
///
/// let resolver = PuzzleResolver::builtin().unwrap();
/// let level = LevelNumber::new(9999).unwrap();
/// assert!(!resolver.exists(level));
///
/// let puzzle = resolver.resolve(level);
/// assert_eq!(puzzle.values(), [6, 7, 8, 9]);
/// assert_eq!(puzzle.target(), 13);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PuzzleResolver {
    catalog: LevelCatalog,
}

impl PuzzleResolver {
    /// Creates a resolver backed by `catalog`.
    #[must_use]
    pub fn new(catalog: LevelCatalog) -> Self {
        Self { catalog }
    }

    /// Creates a resolver backed by the built-in level set.
    ///
    /// # Errors
    ///
    /// Returns [`LevelDataError`] if the embedded data is malformed.
    pub fn builtin() -> Result<Self, LevelDataError> {
        LevelCatalog::builtin().map(Self::new)
    }

    /// Returns the catalog backing this resolver.
    #[must_use]
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// Returns the puzzle for `level`.
    #[must_use]
    pub fn resolve(&self, level: LevelNumber) -> Puzzle {
        if let Some(puzzle) = self.catalog.get(level) {
            log::debug!("resolved authored level {level}");
            return puzzle.clone();
        }
        log::info!("no authored data for level {level}, using fallback puzzle");
        fallback_puzzle(level)
    }

    /// Returns whether authored content exists for `level`.
    #[must_use]
    pub fn exists(&self, level: LevelNumber) -> bool {
        self.catalog.contains(level)
    }

    /// Returns the highest level with authored content.
    #[must_use]
    pub fn max_authored_level(&self) -> Option<LevelNumber> {
        self.catalog.max_level()
    }
}

/// Builds the fallback puzzle for `level`.
///
/// Each value of `[2, 3, 4, 5]` is offset by `level mod 5`, and the target is
/// the sum of the first two resulting values. The shape repeats every five
/// levels.
#[must_use]
#[expect(clippy::missing_panics_doc)]
pub fn fallback_puzzle(level: LevelNumber) -> Puzzle {
    let offset = u64::from(level.get() % 5);
    let values = FALLBACK_BASE.map(|v| v + offset);
    let target = values[0] + values[1];
    Puzzle::new(target, &values).expect("fallback values are positive and fit the grid")
}
