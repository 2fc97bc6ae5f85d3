//! Match rule configuration.
//!
//! Rule constants live here rather than inline in the engine so variants
//! (different starting scores, single-dart turns) stay a config change.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Points each player starts from. Tournament "501" counts down from 501;
/// the house default here is the short 101 game.
pub const DEFAULT_STARTING_SCORE: u32 = 101;

/// Throws per turn before play passes to the other seat.
pub const DEFAULT_THROWS_PER_TURN: usize = 3;

/// Highest single-throw score taken at face value.
pub const DEFAULT_MAX_THROW: u32 = 180;

fn default_starting_score() -> u32 {
    DEFAULT_STARTING_SCORE
}

fn default_throws_per_turn() -> usize {
    DEFAULT_THROWS_PER_TURN
}

fn default_max_throw() -> u32 {
    DEFAULT_MAX_THROW
}

fn default_miss_words() -> Vec<String> {
    ["miss", "мимо", "промах", "молоко"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Rules for one darts match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Points each player starts from.
    #[serde(default = "default_starting_score")]
    starting_score: u32,

    /// Throws per turn before rotation.
    #[serde(default = "default_throws_per_turn")]
    throws_per_turn: usize,

    /// Largest throw value accepted as plausible.
    #[serde(default = "default_max_throw")]
    max_throw: u32,

    /// Words that mark an utterance as an explicit miss (throw of zero).
    /// Matched case-insensitively as substrings of the recognized text.
    #[serde(default = "default_miss_words")]
    miss_words: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_score: default_starting_score(),
            throws_per_turn: default_throws_per_turn(),
            max_throw: default_max_throw(),
            miss_words: default_miss_words(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(starting_score = config.starting_score, "Match config loaded");
        Ok(config)
    }

    /// Returns this config with a different starting score.
    pub fn with_starting_score(mut self, starting_score: u32) -> Self {
        self.starting_score = starting_score;
        self
    }

    /// Returns this config with a different turn length.
    pub fn with_throws_per_turn(mut self, throws_per_turn: usize) -> Self {
        self.throws_per_turn = throws_per_turn;
        self
    }

    /// Returns this config with a different plausibility ceiling.
    pub fn with_max_throw(mut self, max_throw: u32) -> Self {
        self.max_throw = max_throw;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
