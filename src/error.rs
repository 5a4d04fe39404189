//! Error types shared across the soundboard core
//!
//! Nothing in here is fatal: every variant is either ignored, reported to the
//! caller before a commit, or surfaced in the status line.

use std::fmt;
use std::path::PathBuf;

use crate::keymap::KeybindParseError;

/// Errors produced by the dispatch engine, the board and the playback manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundboardError {
    /// A raw key identifier has no entry in the normalization table
    InvalidKeyMapping(String),
    /// The keybind is already bound to another entry (or the stop-all chord)
    KeybindConflict { keybind: String, existing: String },
    /// The audio file does not exist
    MissingResource(PathBuf),
    /// The audio backend failed to open or play the file
    PlaybackFailure { path: PathBuf, reason: String },
    /// The global keyboard hook could not be installed
    HookRegistrationFailure(String),
    /// A required entry field is empty
    InvalidEntry(String),
    /// The keybind string could not be parsed
    InvalidKeybind(KeybindParseError),
    /// No entry at this position
    NoSuchEntry(usize),
}

impl SoundboardError {
    /// Short message for the status line
    pub fn user_message(&self) -> String {
        match self {
            Self::KeybindConflict { keybind, existing } => {
                format!("Keybind {} is already used by {}", keybind, existing)
            }
            Self::MissingResource(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Sound file not found: {}", name)
            }
            other => format!("Error: {}", other),
        }
    }
}

impl fmt::Display for SoundboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyMapping(raw) => write!(f, "unrecognized key: {}", raw),
            Self::KeybindConflict { keybind, existing } => {
                write!(f, "keybind {} is already in use by \"{}\"", keybind, existing)
            }
            Self::MissingResource(path) => write!(f, "sound file not found: {}", path.display()),
            Self::PlaybackFailure { path, reason } => {
                write!(f, "failed to play {}: {}", path.display(), reason)
            }
            Self::HookRegistrationFailure(reason) => {
                write!(f, "global hotkeys unavailable: {}", reason)
            }
            Self::InvalidEntry(reason) => write!(f, "invalid entry: {}", reason),
            Self::InvalidKeybind(e) => write!(f, "invalid keybind: {}", e),
            Self::NoSuchEntry(index) => write!(f, "no sound at position {}", index + 1),
        }
    }
}

impl std::error::Error for SoundboardError {}

impl From<KeybindParseError> for SoundboardError {
    fn from(e: KeybindParseError) -> Self {
        Self::InvalidKeybind(e)
    }
}

/// Errors from reading or writing configuration files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoConfigDir,
    IoError(String),
    ParseError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "No config directory available"),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
