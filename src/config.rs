//! Game configuration.
//!
//! Settings can come from a JSON file, from interactive prompts, or from
//! defaults. Player counts are validated here, before any board is built.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::board::{PlayerColor, COLOR_COUNT};
use crate::rules::TargetLayout;

/// Fewest players a game can have.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game can have.
pub const MAX_PLAYERS: usize = COLOR_COUNT;

/// Default number of hops a computer player takes in one jump chain.
pub const DEFAULT_CHAIN_CAP: usize = 5;

/// Errors raised while setting up a game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("total number of players must be between 2 and 6, got {0}")]
    TotalOutOfRange(usize),

    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("number of players cannot be negative, got {0}")]
    Negative(i64),

    #[error("seat {seat} must play {expected}, got {found}")]
    SeatColor {
        seat: usize,
        expected: PlayerColor,
        found: PlayerColor,
    },
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Setup(#[from] SetupError),
}

/// Settings for a single game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of interactive players. They take the first colors.
    pub humans: usize,
    /// Number of computer players.
    pub computers: usize,
    /// Which target-zone table decides the winner.
    pub target_layout: TargetLayout,
    /// Maximum hops a computer player chains in one turn.
    pub computer_chain_cap: usize,
    /// Directory for game log files. Defaults to the working directory.
    pub log_dir: Option<PathBuf>,
    /// Random seed for computer players (0 = use entropy).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            humans: 1,
            computers: 1,
            target_layout: TargetLayout::Classic,
            computer_chain_cap: DEFAULT_CHAIN_CAP,
            log_dir: None,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Loads and validates a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the player counts.
    pub fn validate(&self) -> Result<(), SetupError> {
        validate_player_counts(self.humans, self.computers)
    }

    /// Total number of players.
    pub fn num_players(&self) -> usize {
        self.humans.saturating_add(self.computers)
    }
}

/// Rejects totals outside 2-6. A total too large to represent is reported
/// as `usize::MAX`.
pub fn validate_player_counts(humans: usize, computers: usize) -> Result<(), SetupError> {
    let total = humans.checked_add(computers).unwrap_or(usize::MAX);
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&total) {
        return Err(SetupError::TotalOutOfRange(total));
    }
    Ok(())
}

/// Parses one player count typed at a prompt.
pub fn parse_player_count(text: &str) -> Result<usize, SetupError> {
    let text = text.trim();
    let value: i64 = text
        .parse()
        .map_err(|_| SetupError::NotAnInteger(text.to_string()))?;
    if value < 0 {
        return Err(SetupError::Negative(value));
    }
    usize::try_from(value).map_err(|_| SetupError::NotAnInteger(text.to_string()))
}
