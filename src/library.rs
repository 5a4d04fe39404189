//! Sound library persistence
//!
//! The board only sees the [`EntryStore`] trait; [`JsonEntryStore`] keeps the
//! list in `~/.config/soundboard/sounds.json` as a pretty-printed array of
//! `{"name", "filePath", "keybind"}` objects.

use std::path::{Path, PathBuf};

use crate::entry::SoundEntry;
use crate::error::ConfigError;

/// Loads and saves the full entry list as one snapshot
pub trait EntryStore {
    fn load_entries(&self) -> Result<Vec<SoundEntry>, ConfigError>;
    fn save_entries(&self, entries: &[SoundEntry]) -> Result<(), ConfigError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonEntryStore {
    path: PathBuf,
}

impl JsonEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/soundboard/sounds.json`
    pub fn default_location() -> Result<Self, ConfigError> {
        crate::config_paths::sounds_file()
            .map(Self::new)
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStore for JsonEntryStore {
    /// A missing file is an empty library
    fn load_entries(&self) -> Result<Vec<SoundEntry>, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(
                "Sound library not found at {}, starting empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            ConfigError::IoError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        let entries: Vec<SoundEntry> = serde_json::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::info!(
            "Loaded {} sounds from {}",
            entries.len(),
            self.path.display()
        );
        Ok(entries)
    }

    fn save_entries(&self, entries: &[SoundEntry]) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| {
            ConfigError::IoError(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            "Saved {} sounds to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
