//! KeybindRegistry: combination → bound action lookup
//!
//! The mapping is rebuilt wholesale from the entry list whenever it changes and
//! published as an immutable snapshot. Readers on any thread load the current
//! snapshot and never observe a half-built map.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::combination::Combination;
use crate::entry::SoundEntry;

/// Name reported when a candidate keybind collides with the stop-all chord
pub const STOP_ALL_NAME: &str = "Stop all sounds";

/// What a resolved combination does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundAction {
    /// Play this entry
    Play(SoundEntry),
    /// Stop every active player
    StopAll,
}

#[derive(Debug, Clone)]
struct Slot {
    index: usize,
    entry: SoundEntry,
}

/// One immutable generation of the registry
#[derive(Debug, Default)]
struct Bindings {
    entries: HashMap<Combination, Slot>,
    stop_all: Option<Combination>,
}

/// Shared, cloneable handle to the current keybind mapping
#[derive(Debug, Clone)]
pub struct KeybindRegistry {
    inner: Arc<ArcSwap<Bindings>>,
}

impl Default for KeybindRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(Bindings::default())),
        }
    }

    /// Replace the entry mapping with one built from `entries`
    ///
    /// Entries whose keybind does not parse are skipped with a warning. If two
    /// entries share a combination the first one keeps it.
    pub fn rebuild(&self, entries: &[SoundEntry]) {
        let mut map: HashMap<Combination, Slot> = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let combination = match entry.keybind.parse::<Combination>() {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(
                        "Skipping \"{}\": bad keybind {:?}: {}",
                        entry.name,
                        entry.keybind,
                        e
                    );
                    continue;
                }
            };

            if let Some(existing) = map.get(&combination) {
                tracing::warn!(
                    "Keybind {} of \"{}\" is already bound to \"{}\", ignoring",
                    combination,
                    entry.name,
                    existing.entry.name
                );
                continue;
            }

            map.insert(
                combination,
                Slot {
                    index,
                    entry: entry.clone(),
                },
            );
        }

        tracing::debug!("Registry rebuilt with {} bindings", map.len());
        for (combination, slot) in &map {
            tracing::debug!("  {} -> {}", combination, slot.entry.name);
        }

        self.inner.rcu(|current| Bindings {
            entries: map.clone(),
            stop_all: current.stop_all.clone(),
        });
    }

    /// Set (or clear) the reserved stop-all chord
    pub fn set_stop_all(&self, combination: Option<Combination>) {
        self.inner.rcu(|current| Bindings {
            entries: current.entries.clone(),
            stop_all: combination.clone(),
        });
    }

    pub fn stop_all_combination(&self) -> Option<Combination> {
        self.inner.load().stop_all.clone()
    }

    /// Look up the action bound to a combination
    ///
    /// The stop-all chord takes precedence over any entry with the same keybind.
    pub fn resolve_action(&self, combination: &Combination) -> Option<BoundAction> {
        let bindings = self.inner.load();
        if bindings.stop_all.as_ref() == Some(combination) {
            return Some(BoundAction::StopAll);
        }
        bindings
            .entries
            .get(combination)
            .map(|slot| BoundAction::Play(slot.entry.clone()))
    }

    /// Look up the entry bound to a combination
    pub fn resolve(&self, combination: &Combination) -> Option<SoundEntry> {
        match self.resolve_action(combination)? {
            BoundAction::Play(entry) => Some(entry),
            BoundAction::StopAll => None,
        }
    }

    /// Name of whatever already holds `candidate`, ignoring the entry at
    /// position `excluding`
    pub fn conflict(&self, candidate: &Combination, excluding: Option<usize>) -> Option<String> {
        let bindings = self.inner.load();
        if bindings.stop_all.as_ref() == Some(candidate) {
            return Some(STOP_ALL_NAME.to_string());
        }
        bindings
            .entries
            .get(candidate)
            .filter(|slot| Some(slot.index) != excluding)
            .map(|slot| slot.entry.name.clone())
    }

    pub fn has_conflict(&self, candidate: &Combination, excluding: Option<usize>) -> bool {
        self.conflict(candidate, excluding).is_some()
    }

    /// Number of entry bindings (the stop-all chord is not counted)
    pub fn len(&self) -> usize {
        self.inner.load().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, keybind: &str) -> SoundEntry {
        SoundEntry::new(name, format!("/snd/{}.wav", name.to_lowercase()), keybind)
    }

    fn combo(s: &str) -> Combination {
        s.parse().expect("valid combination")
    }

    #[test]
    fn test_resolve_after_rebuild() {
        let registry = KeybindRegistry::new();
        registry.rebuild(&[entry("Horn", "CTRL+H"), entry("Bell", "CTRL+B")]);

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve(&combo("ctrl+h")).map(|e| e.name),
            Some("Horn".to_string())
        );
        assert!(registry.resolve(&combo("CTRL+X")).is_none());
    }

    #[test]
    fn test_rebuild_replaces_whole_mapping() {
        let registry = KeybindRegistry::new();
        registry.rebuild(&[entry("Horn", "CTRL+H")]);
        registry.rebuild(&[entry("Bell", "CTRL+B")]);

        assert!(registry.resolve(&combo("CTRL+H")).is_none());
        assert!(registry.resolve(&combo("CTRL+B")).is_some());
    }

    #[test]
    fn test_clones_share_the_mapping() {
        let registry = KeybindRegistry::new();
        let reader = registry.clone();
        registry.rebuild(&[entry("Horn", "CTRL+H")]);
        assert!(reader.resolve(&combo("CTRL+H")).is_some());
    }

    #[test]
    fn test_bad_keybinds_are_skipped() {
        let registry = KeybindRegistry::new();
        registry.rebuild(&[entry("Broken", "CTRL+WHAT"), entry("Horn", "CTRL+H")]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let registry = KeybindRegistry::new();
        registry.rebuild(&[entry("Horn", "CTRL+H"), entry("Honk", "H+CTRL")]);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve(&combo("CTRL+H")).map(|e| e.name),
            Some("Horn".to_string())
        );
    }

    #[test]
    fn test_conflict_excludes_edited_index() {
        let registry = KeybindRegistry::new();
        registry.rebuild(&[entry("Horn", "CTRL+S"), entry("Bell", "CTRL+B")]);

        assert!(registry.has_conflict(&combo("CTRL+S"), None));
        assert!(registry.has_conflict(&combo("CTRL+S"), Some(1)));
        assert!(!registry.has_conflict(&combo("CTRL+S"), Some(0)));
        assert_eq!(
            registry.conflict(&combo("CTRL+S"), Some(1)),
            Some("Horn".to_string())
        );
    }

    #[test]
    fn test_stop_all_chord() {
        let registry = KeybindRegistry::new();
        registry.set_stop_all(Some(combo("CTRL+SHIFT+ESCAPE")));
        registry.rebuild(&[entry("Horn", "CTRL+H")]);

        // Survives a rebuild
        assert_eq!(
            registry.resolve_action(&combo("ESCAPE+SHIFT+CTRL")),
            Some(BoundAction::StopAll)
        );
        assert_eq!(
            registry.conflict(&combo("CTRL+SHIFT+ESCAPE"), None),
            Some(STOP_ALL_NAME.to_string())
        );
        assert!(registry.resolve(&combo("CTRL+SHIFT+ESCAPE")).is_none());

        registry.set_stop_all(None);
        assert!(registry.resolve_action(&combo("CTRL+SHIFT+ESCAPE")).is_none());
        assert!(registry.resolve(&combo("CTRL+H")).is_some());
    }
}
