//! Soundboard - keyboard-driven clip player
//!
//! This crate provides the core types and logic: the keybind dispatch engine,
//! the playback lifecycle manager, and the sound board they serve. The binary
//! adds the window, the global hook wiring and the CLI.

pub mod board;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod entry;
pub mod error;
pub mod hook;
pub mod keymap;
pub mod library;
pub mod messages;
pub mod playback;
pub mod session;
pub mod status;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use board::SoundBoard;
pub use config::AppConfig;
pub use entry::SoundEntry;
pub use error::{ConfigError, SoundboardError};
pub use messages::Msg;
pub use session::Session;
