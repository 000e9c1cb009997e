use std::{path::PathBuf, time::Duration};

use clap::Parser;
use reckon_game::SessionSettings;
use reckon_levels::{LevelCatalog, LevelDataError, PuzzleResolver};

/// Command-line configuration of the terminal game.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct AppConfig {
    /// Directory where progress is saved.
    #[arg(long, value_name = "DIR", default_value = ".reckon")]
    pub data_dir: PathBuf,

    /// JSON file with levels to use instead of the built-in ones.
    #[arg(long, value_name = "FILE")]
    pub levels: Option<PathBuf>,

    /// Level to start on, overriding saved progress.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub level: Option<u32>,

    /// Keep progress in memory only.
    #[arg(long)]
    pub in_memory: bool,

    /// How long a rejected move stays on screen, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 600)]
    pub invalid_move_delay_ms: u64,
}

impl AppConfig {
    /// Returns the session settings described by this configuration.
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::default()
            .invalid_move_delay(Duration::from_millis(self.invalid_move_delay_ms))
    }

    /// Builds the puzzle resolver from the configured level source.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom level file cannot be read or is invalid.
    pub fn resolver(&self) -> Result<PuzzleResolver, LevelDataError> {
        let catalog = match &self.levels {
            Some(path) => LevelCatalog::load(path)?,
            None => LevelCatalog::builtin()?,
        };
        Ok(PuzzleResolver::new(catalog))
    }
}
