//! SoundBoard: the ordered entry collection and its add/edit/remove flow
//!
//! Every mutation validates first, then commits, rebuilds the registry, saves
//! the whole list through the store and reports on the status line.

use std::path::Path;

use crate::entry::SoundEntry;
use crate::error::SoundboardError;
use crate::keymap::{Combination, KeybindRegistry};
use crate::library::EntryStore;
use crate::status::StatusLine;

pub type Result<T> = std::result::Result<T, SoundboardError>;

pub struct SoundBoard<S: EntryStore> {
    entries: Vec<SoundEntry>,
    registry: KeybindRegistry,
    store: S,
    status: StatusLine,
}

impl<S: EntryStore> SoundBoard<S> {
    /// An empty board. Call [`SoundBoard::load`] to read the store.
    pub fn new(store: S, status: StatusLine) -> Self {
        Self {
            entries: Vec::new(),
            registry: KeybindRegistry::new(),
            store,
            status,
        }
    }

    /// Replace the in-memory list with the store's contents
    ///
    /// An unreadable library leaves the board empty and reports the error.
    pub fn load(&mut self) {
        self.entries = match self.store.load_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to load sounds: {}", e);
                self.status.set(format!("Error: {}", e));
                self.registry.rebuild(&[]);
                return;
            }
        };

        self.registry.rebuild(&self.entries);
        self.status
            .set(format!("Loaded {} sounds", self.entries.len()));
    }

    /// Validate and append a new entry. Returns its index.
    pub fn add(&mut self, draft: SoundEntry) -> Result<usize> {
        let entry = self.validate(draft, None)?;
        let name = entry.name.clone();

        self.entries.push(entry);
        self.commit(format!("Added: {}", name));
        Ok(self.entries.len() - 1)
    }

    /// Replace all fields of the entry at `index`
    ///
    /// The entry's own current keybind does not count as a conflict.
    pub fn edit(&mut self, index: usize, draft: SoundEntry) -> Result<()> {
        if index >= self.entries.len() {
            return Err(SoundboardError::NoSuchEntry(index));
        }
        let entry = self.validate(draft, Some(index))?;
        let name = entry.name.clone();

        self.entries[index] = entry;
        self.commit(format!("Updated: {}", name));
        Ok(())
    }

    /// Remove and return the entry at `index`
    pub fn remove(&mut self, index: usize) -> Result<SoundEntry> {
        if index >= self.entries.len() {
            return Err(SoundboardError::NoSuchEntry(index));
        }
        let entry = self.entries.remove(index);

        self.commit(format!("Removed: {}", entry.name));
        Ok(entry)
    }

    pub fn entries(&self) -> &[SoundEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SoundEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A handle to the live registry. Clones see every later rebuild.
    pub fn registry(&self) -> KeybindRegistry {
        self.registry.clone()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Trim fields, check them, and canonicalize the keybind
    fn validate(&self, draft: SoundEntry, excluding: Option<usize>) -> Result<SoundEntry> {
        let name = draft.name.trim();
        let path = draft.resource_path.trim();
        let keybind = draft.keybind.trim();

        if name.is_empty() || path.is_empty() || keybind.is_empty() {
            return Err(SoundboardError::InvalidEntry(
                "Please fill in all fields".to_string(),
            ));
        }

        let combination: Combination = keybind.parse()?;

        if !Path::new(path).exists() {
            return Err(SoundboardError::MissingResource(path.into()));
        }

        if let Some(existing) = self.registry.conflict(&combination, excluding) {
            return Err(SoundboardError::KeybindConflict {
                keybind: combination.to_string(),
                existing,
            });
        }

        Ok(SoundEntry::new(name, path, combination.to_string()))
    }

    /// Publish the current list: rebuild, report, save
    fn commit(&mut self, message: String) {
        self.registry.rebuild(&self.entries);
        tracing::info!("{}", message);
        self.status.set(message);

        if let Err(e) = self.store.save_entries(&self.entries) {
            tracing::warn!("Failed to save sounds: {}", e);
            self.status.set(format!("Error: could not save sounds ({})", e));
        }
    }
}
