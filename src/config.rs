//! Application configuration persistence
//!
//! Stores user preferences in `~/.config/soundboard/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::keymap::Combination;

/// Application configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Install the system-wide keyboard hook on startup
    #[serde(default = "default_global_hotkeys")]
    pub global_hotkeys: bool,

    /// How long transient status messages stay visible
    #[serde(default = "default_status_timeout_ms")]
    pub status_timeout_ms: u64,

    /// Chord that stops every playing sound. `null` disables it.
    #[serde(default = "default_stop_all_keybind")]
    pub stop_all_keybind: Option<String>,
}

fn default_global_hotkeys() -> bool {
    true
}

fn default_status_timeout_ms() -> u64 {
    3000
}

fn default_stop_all_keybind() -> Option<String> {
    Some("CTRL+SHIFT+ESCAPE".to_string())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            global_hotkeys: default_global_hotkeys(),
            status_timeout_ms: default_status_timeout_ms(),
            stop_all_keybind: default_stop_all_keybind(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| {
            ConfigError::IoError(format!(
                "Failed to write config to {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_millis(self.status_timeout_ms)
    }

    /// The parsed stop-all chord. An unparseable value disables it with a warning.
    pub fn stop_all_combination(&self) -> Option<Combination> {
        let raw = self.stop_all_keybind.as_deref()?;
        match raw.parse() {
            Ok(combination) => Some(combination),
            Err(e) => {
                tracing::warn!("Ignoring stop_all_keybind {:?}: {}", raw, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.global_hotkeys);
        assert_eq!(config.status_timeout(), Duration::from_secs(3));
        assert_eq!(
            config.stop_all_combination().map(|c| c.to_string()),
            Some("CTRL+SHIFT+ESCAPE".to_string())
        );
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str("global_hotkeys: false\n").unwrap();
        assert!(!config.global_hotkeys);
        assert_eq!(config.status_timeout_ms, 3000);
        assert!(config.stop_all_keybind.is_some());
    }

    #[test]
    fn test_null_disables_stop_all() {
        let config: AppConfig = serde_yaml::from_str("stop_all_keybind: null\n").unwrap();
        assert_eq!(config.stop_all_combination(), None);
    }

    #[test]
    fn test_bad_stop_all_is_ignored() {
        let config = AppConfig {
            stop_all_keybind: Some("CTRL+NOPE".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.stop_all_combination(), None);
    }
}
