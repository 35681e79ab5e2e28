//! Editor configuration persistence
//!
//! Stores defaults for new editors in `~/.config/scribe/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Quiet period after the last edit before the change callback fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Undo steps kept by the document surface
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Default counter limit for fields that do not set their own
    #[serde(default)]
    pub max_length: Option<usize>,
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_history_limit() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            history_limit: default_history_limit(),
            max_length: None,
        }
    }
}

impl EditorConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            crate::config_paths::ensure_dir(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: EditorConfig = serde_yaml::from_str("max_length: 500\n").unwrap();
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.max_length, Some(500));
        assert_eq!(config.debounce(), Duration::from_millis(100));
    }
}
