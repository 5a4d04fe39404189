//! SoundEntry: one clip bound to one keybind

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A named audio file bound to a key combination
///
/// Entries have no generated id. Within a board they are addressed by
/// position, and keybinds are unique across the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundEntry {
    pub name: String,
    /// Path to a local audio file. Only checked when played.
    #[serde(rename = "filePath")]
    pub resource_path: String,
    pub keybind: String,
}

impl SoundEntry {
    pub fn new(
        name: impl Into<String>,
        resource_path: impl Into<String>,
        keybind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_path: resource_path.into(),
            keybind: keybind.into(),
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.resource_path)
    }
}

impl fmt::Display for SoundEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.keybind)
    }
}
