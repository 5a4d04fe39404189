//! Command-line argument parsing
//!
//! Supports:
//! - Running the soundboard window (default)
//! - Listing, adding, editing and removing sounds without the window
//! - Playing one sound to completion

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A keyboard-driven soundboard
#[derive(Parser, Debug)]
#[command(name = "soundboard", version, about = "A keyboard-driven soundboard")]
pub struct CliArgs {
    /// Use this directory instead of ~/.config/soundboard
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Do not install the system-wide keyboard hook
    #[arg(long, global = true)]
    pub no_global: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Open the soundboard window and listen for hotkeys
    Run,
    /// Print every sound with its position and keybind
    List,
    /// Add a sound
    Add {
        /// Display name (defaults to the file name without extension)
        #[arg(long)]
        name: Option<String>,
        /// Audio file (opens a file picker when omitted)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Key combination, e.g. "ctrl+alt+h"
        #[arg(long)]
        key: String,
    },
    /// Change a sound; omitted fields keep their value
    Edit {
        /// Position as shown by `list` (1-based)
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        #[arg(long)]
        key: Option<String>,
    },
    /// Remove a sound
    Remove {
        /// Position as shown by `list` (1-based)
        index: usize,
    },
    /// Play a sound and wait until it ends
    Play {
        /// Position as shown by `list` (1-based)
        index: usize,
    },
}

impl CliArgs {
    /// The subcommand to run, `run` when none was given
    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Run)
    }
}

/// Convert a 1-based position from the command line to an index
pub fn position_to_index(position: usize) -> Result<usize, String> {
    position
        .checked_sub(1)
        .ok_or_else(|| "Positions start at 1".to_string())
}

/// Name for a sound picked from a file: the file name without extension
pub fn default_name(path: &std::path::Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|stem| !stem.is_empty())
}
