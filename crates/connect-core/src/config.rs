//! Board dimensions and win rule, fixed when a game is constructed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of rows
pub const DEFAULT_ROWS: usize = 6;

/// Default number of columns
pub const DEFAULT_COLUMNS: usize = 9;

/// Default run length needed to win
pub const DEFAULT_WIN_LENGTH: usize = 5;

/// Errors from an invalid game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
}

/// Game configuration.
///
/// Field names on the wire follow the historical settings keys
/// (`game_rows`, `game_columns`, `win_zone`). A `win_length` longer than
/// both dimensions is accepted. Rows and columns can then never hold a run,
/// but a diagonal that wraps past the board edge repeats cells and still can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    #[serde(rename = "game_rows")]
    pub rows: usize,
    #[serde(rename = "game_columns")]
    pub columns: usize,
    #[serde(rename = "win_zone")]
    pub win_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Self {
        Self {
            rows,
            columns,
            win_length,
        }
    }

    /// Check that every dimension is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NotPositive("game_rows"));
        }
        if self.columns == 0 {
            return Err(ConfigError::NotPositive("game_columns"));
        }
        if self.win_length == 0 {
            return Err(ConfigError::NotPositive("win_zone"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::new(6, 9, 5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(
            GameConfig::new(0, 9, 5).validate(),
            Err(ConfigError::NotPositive("game_rows"))
        );
        assert_eq!(
            GameConfig::new(6, 0, 5).validate(),
            Err(ConfigError::NotPositive("game_columns"))
        );
        assert_eq!(
            GameConfig::new(6, 9, 0).validate(),
            Err(ConfigError::NotPositive("win_zone"))
        );
    }

    #[test]
    fn test_oversized_win_length_is_valid() {
        assert!(GameConfig::new(3, 3, 10).validate().is_ok());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"win_zone": 4}"#).unwrap();
        assert_eq!(config, GameConfig::new(6, 9, 4));
    }
}
