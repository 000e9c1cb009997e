//! Authored level content.
//!
//! Levels are stored as a JSON object keyed by level number:
//!
//! ```json
//! {
//!   "1": { "target": 5, "numbers": [2, 3] },
//!   "2": { "target": 6, "numbers": [2, 3] }
//! }
//! ```
//!
//! The whole file is validated when it is loaded, so lookups never fail later.

use std::{collections::BTreeMap, fs, io, path::Path};

use reckon_core::{LevelNumber, Puzzle, PuzzleError};

const BUILTIN_LEVELS: &str = include_str!("../levels.json");

/// Errors that can occur while loading level content.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LevelDataError {
    /// The level file could not be read.
    #[display("failed to read level data: {_0}")]
    Io(#[from] io::Error),
    /// The level file is not valid JSON or has the wrong shape.
    #[display("malformed level data: {_0}")]
    Json(#[from] serde_json::Error),
    /// A key is not a positive integer.
    #[display("invalid level key {key:?}")]
    InvalidKey {
        /// The offending key.
        #[error(not(source))]
        key: String,
    },
    /// A level definition is not a playable puzzle.
    #[display("level {level} is invalid: {source}")]
    InvalidLevel {
        /// Level number of the definition.
        level: LevelNumber,
        /// Why the definition was rejected.
        source: PuzzleError,
    },
}

/// Serialized form of a single level.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LevelData {
    /// Value the player has to reach.
    pub target: u64,
    /// Starting tile values, in slot order.
    pub numbers: Vec<u64>,
}

/// Validated level content, keyed by level number.
///
/// # Examples
///
/// ```
/// use reckon_core::LevelNumber;
/// use reckon_levels::LevelCatalog;
///
/// let catalog = LevelCatalog::from_json(r#"{ "1": { "target": 3, "numbers": [6, 2, 4] } }"#)
///     .unwrap();
/// let level = LevelNumber::new(1).unwrap();
/// assert_eq!(catalog.get(level).map(|p| p.target()), Some(3));
/// assert_eq!(catalog.max_level(), Some(level));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: BTreeMap<LevelNumber, Puzzle>,
}

impl LevelCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the level set shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns [`LevelDataError`] if the embedded data is malformed.
    pub fn builtin() -> Result<Self, LevelDataError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    /// Reads and parses a level file.
    ///
    /// # Errors
    ///
    /// Returns [`LevelDataError::Io`] if the file cannot be read, or any
    /// parsing error from [`LevelCatalog::from_json`].
    pub fn load(path: &Path) -> Result<Self, LevelDataError> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::info!(
            "loaded {} levels from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parses level content from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`LevelDataError::Json`] for malformed JSON,
    /// [`LevelDataError::InvalidKey`] for keys that are not positive integers,
    /// and [`LevelDataError::InvalidLevel`] for definitions that are not
    /// playable puzzles.
    pub fn from_json(json: &str) -> Result<Self, LevelDataError> {
        let raw: BTreeMap<String, LevelData> = serde_json::from_str(json)?;
        let levels = raw.into_iter().map(|(key, data)| {
            let level = key
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(|n| LevelNumber::new(n).ok())
                .ok_or(LevelDataError::InvalidKey { key })?;
            Ok((level, data))
        });
        Self::from_levels(levels.collect::<Result<Vec<_>, LevelDataError>>()?)
    }

    /// Builds a catalog from already decoded level definitions.
    ///
    /// A later definition for the same level replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`LevelDataError::InvalidLevel`] for the first definition that
    /// is not a playable puzzle.
    pub fn from_levels(
        levels: impl IntoIterator<Item = (LevelNumber, LevelData)>,
    ) -> Result<Self, LevelDataError> {
        let levels = levels
            .into_iter()
            .map(|(level, data)| {
                Puzzle::new(data.target, &data.numbers)
                    .map(|puzzle| (level, puzzle))
                    .map_err(|source| LevelDataError::InvalidLevel { level, source })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { levels })
    }

    /// Returns the authored puzzle for `level`, if any.
    #[must_use]
    pub fn get(&self, level: LevelNumber) -> Option<&Puzzle> {
        self.levels.get(&level)
    }

    /// Returns whether authored content exists for `level`.
    #[must_use]
    pub fn contains(&self, level: LevelNumber) -> bool {
        self.levels.contains_key(&level)
    }

    /// Returns the highest authored level number.
    #[must_use]
    pub fn max_level(&self) -> Option<LevelNumber> {
        self.levels.keys().next_back().copied()
    }

    /// Returns the number of authored levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Returns whether the catalog has no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates over authored levels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (LevelNumber, &Puzzle)> {
        self.levels.iter().map(|(level, puzzle)| (*level, puzzle))
    }
}
