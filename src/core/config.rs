//! Match configuration with documented constants
//!
//! The engine has very few knobs. Everything tunable lives here so a
//! front-end can load a TOML file instead of hard-coding values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TacticsError};

/// Side length of the square board in cells
pub const DEFAULT_GRID_SIZE: i32 = 8;

/// Pixel size of one cell as drawn by the reference front-end
pub const DEFAULT_CELL_SIZE: f32 = 50.0;

/// Time between two opposing micro-actions (milliseconds)
///
/// Also the pause between the end of the controlled turn and the first
/// opposing action, and between the last opposing action and the hand-back.
pub const DEFAULT_OPPOSING_ACTION_INTERVAL_MS: u64 = 10_000;

/// Configuration for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board side length; valid cells are `0..grid_size` on both axes
    pub grid_size: i32,

    /// Pixel size of a cell, used by `handle_pointer_at`
    ///
    /// Pointer coordinates are divided by this and floored.
    pub cell_size: f32,

    /// Minimum clock delta between opposing actions
    ///
    /// At the default (10 000 ms) a three-unit enemy roster needs
    /// roughly 40 seconds of wall time to hand the turn back.
    pub opposing_action_interval_ms: u64,

    /// Score bonus for a controlled-side kill, on top of the damage dealt
    pub kill_bonus: u32,

    /// Stop the match once either roster is empty
    ///
    /// When false the match keeps cycling turns with an empty roster.
    pub end_on_elimination: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            opposing_action_interval_ms: DEFAULT_OPPOSING_ACTION_INTERVAL_MS,
            kill_bonus: crate::combat::constants::KILL_BONUS,
            end_on_elimination: true,
        }
    }
}

impl MatchConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style override of the opposing action cadence
    pub fn with_action_interval(mut self, interval_ms: u64) -> Self {
        self.opposing_action_interval_ms = interval_ms;
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(TacticsError::InvalidConfig(format!(
                "grid_size must be positive, got {}",
                self.grid_size
            )));
        }

        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(TacticsError::InvalidConfig(format!(
                "cell_size must be a positive number, got {}",
                self.cell_size
            )));
        }

        Ok(())
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: MatchConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }
}
