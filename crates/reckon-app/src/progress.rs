use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{KeyValueStore, StoreError};

const CURRENT_LEVEL_KEY: &str = "currentLevel";
const COMPLETED_LEVELS_KEY: &str = "completedLevels";

/// Typed access to the player's progress in a [`KeyValueStore`].
///
/// Values are stored as JSON: the current level as a number, the completed
/// levels as a sorted array of unique numbers. Reads never fail; missing,
/// unreadable or corrupt values fall back to a fresh game and are logged.
#[derive(Debug, Clone)]
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Wraps `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.store
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_owned(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Returns the level the player is on; 1 if none is stored.
    pub async fn current_level(&self) -> u32 {
        match self.read::<u32>(CURRENT_LEVEL_KEY).await {
            Ok(Some(level)) if level >= 1 => level,
            Ok(Some(level)) => {
                log::warn!("ignoring stored current level {level}");
                1
            }
            Ok(None) => 1,
            Err(e) => {
                log::warn!("failed to read current level: {e}");
                1
            }
        }
    }

    /// Stores the level the player is on.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLevel`] if `level` is 0, or the error of
    /// the underlying store.
    pub async fn set_current_level(&self, level: u32) -> Result<(), StoreError> {
        if level < 1 {
            return Err(StoreError::InvalidLevel(level));
        }
        self.store
            .set(CURRENT_LEVEL_KEY, Value::from(level).to_string())
            .await
    }

    /// Returns the completed levels, sorted and without duplicates.
    pub async fn completed_levels(&self) -> Vec<u32> {
        match self.read::<Vec<u32>>(COMPLETED_LEVELS_KEY).await {
            Ok(Some(mut levels)) => {
                levels.retain(|&level| level >= 1);
                levels.sort_unstable();
                levels.dedup();
                levels
            }
            Ok(None) => vec![],
            Err(e) => {
                log::warn!("failed to read completed levels: {e}");
                vec![]
            }
        }
    }

    /// Records `level` as completed. Recording a level twice has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLevel`] if `level` is 0, or the error of
    /// the underlying store.
    pub async fn add_completed_level(&self, level: u32) -> Result<(), StoreError> {
        if level < 1 {
            return Err(StoreError::InvalidLevel(level));
        }
        let mut levels = self.completed_levels().await;
        let Err(index) = levels.binary_search(&level) else {
            return Ok(());
        };
        levels.insert(index, level);
        self.store
            .set(COMPLETED_LEVELS_KEY, Value::from(levels).to_string())
            .await
    }
}
