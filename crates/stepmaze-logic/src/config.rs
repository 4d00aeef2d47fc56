//! Validation rule configuration.
//!
//! The thresholds the validator applies are game-design constants with no
//! derivation behind them, so they live in a plain serializable struct
//! rather than being hard-coded into the checks.
//!
//! ```
//! use stepmaze_logic::config::{validate_rules, ValidationRules};
//!
//! let rules = ValidationRules::default();
//! assert_eq!(rules.min_size, 7);
//! assert!(validate_rules(&rules).is_empty());
//! ```

use crate::constants::{size, thresholds};
use serde::{Deserialize, Serialize};

/// Thresholds used by [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Smallest allowed side length.
    pub min_size: usize,
    /// Largest allowed side length.
    pub max_size: usize,
    /// Lowest allowed fraction of internal walls still standing.
    pub min_wall_ratio: f64,
    /// Highest allowed fraction of internal walls still standing.
    pub max_wall_ratio: f64,
    /// Side length that gets `small_maze_open_cell_cap`.
    pub small_maze_size: usize,
    pub small_maze_open_cell_cap: usize,
    /// Open-cell cap for every other size.
    pub open_cell_cap: usize,
    pub path_length_scale: usize,
    pub path_length_offset: usize,
    pub turn_divisor: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_size: size::MIN,
            max_size: size::MAX,
            min_wall_ratio: thresholds::MIN_WALL_RATIO,
            max_wall_ratio: thresholds::MAX_WALL_RATIO,
            small_maze_size: thresholds::SMALL_MAZE_SIZE,
            small_maze_open_cell_cap: thresholds::SMALL_MAZE_OPEN_CELL_CAP,
            open_cell_cap: thresholds::OPEN_CELL_CAP,
            path_length_scale: thresholds::PATH_LENGTH_SCALE,
            path_length_offset: thresholds::PATH_LENGTH_OFFSET,
            turn_divisor: thresholds::TURN_DIVISOR,
        }
    }
}

impl ValidationRules {
    /// Open-cell cap for a maze with `rows` rows.
    pub fn open_cell_cap_for(&self, rows: usize) -> usize {
        if rows == self.small_maze_size {
            self.small_maze_open_cell_cap
        } else {
            self.open_cell_cap
        }
    }

    /// Minimum number of cells on the start→end path.
    pub fn min_path_length(&self, rows: usize) -> usize {
        (self.path_length_scale * rows).saturating_sub(self.path_length_offset)
    }

    /// Minimum number of turns on the start→end path.
    pub fn min_turns(&self, rows: usize) -> usize {
        rows / self.turn_divisor.max(1)
    }

    pub fn size_in_range(&self, n: usize) -> bool {
        (self.min_size..=self.max_size).contains(&n)
    }
}

/// Rule configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min_size` is zero or above `max_size`.
    InvalidSizeRange { min: usize, max: usize },
    /// A wall ratio outside `[0, 1]` or an inverted ratio range.
    InvalidWallRatio { min: f64, max: f64 },
    /// `turn_divisor` of zero.
    ZeroTurnDivisor,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSizeRange { min, max } => {
                write!(f, "Invalid size range {}..={}", min, max)
            }
            ConfigError::InvalidWallRatio { min, max } => {
                write!(f, "Invalid wall ratio range {:.2}..={:.2}", min, max)
            }
            ConfigError::ZeroTurnDivisor => write!(f, "Turn divisor must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a rule set, returning all errors found.
pub fn validate_rules(rules: &ValidationRules) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if rules.min_size == 0 || rules.min_size > rules.max_size {
        errors.push(ConfigError::InvalidSizeRange {
            min: rules.min_size,
            max: rules.max_size,
        });
    }

    let unit = 0.0..=1.0;
    if !unit.contains(&rules.min_wall_ratio)
        || !unit.contains(&rules.max_wall_ratio)
        || rules.min_wall_ratio > rules.max_wall_ratio
    {
        errors.push(ConfigError::InvalidWallRatio {
            min: rules.min_wall_ratio,
            max: rules.max_wall_ratio,
        });
    }

    if rules.turn_divisor == 0 {
        errors.push(ConfigError::ZeroTurnDivisor);
    }

    errors
}
