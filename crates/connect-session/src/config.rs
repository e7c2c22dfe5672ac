use std::path::{Path, PathBuf};
use std::time::Duration;

use connect_core::GameConfig;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid game settings: {0}")]
    Game(#[from] connect_core::ConfigError),

    #[error("invalid config: {0}")]
    Validation(String),
}

/// Terminal client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Seconds the player to move may stay idle before the game is closed
    pub wait_timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig { wait_timeout: 30 }
    }
}

impl ClientConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if self.client.wait_timeout == 0 {
            return Err(ConfigError::Validation(
                "client.wait_timeout must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.game, GameConfig::default());
        assert_eq!(config.client.wait_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [game]
            game_rows = 7
            game_columns = 8
            win_zone = 4

            [client]
            wait_timeout = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.game, GameConfig::new(7, 8, 4));
        assert_eq!(config.client.wait_timeout, 10);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_toml_str("[game]\nwin_zone = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Game(_)));

        let err = AppConfig::from_toml_str("[client]\nwait_timeout = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = AppConfig::from_toml_str("[game]\ngame_rows = \"six\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/connectpy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
