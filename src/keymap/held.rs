//! Per-source set of currently held keys

use std::collections::HashSet;

use super::combination::Combination;
use super::types::KeyToken;

/// Tokens currently reported as down by one input source
#[derive(Clone, Debug, Default)]
pub struct HeldKeySet {
    keys: HashSet<KeyToken>,
}

impl HeldKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns true if the token was newly added,
    /// false if it was already held (key-repeat).
    pub fn on_press(&mut self, token: KeyToken) -> bool {
        self.keys.insert(token)
    }

    /// Record a release. Returns true if the token was held.
    pub fn on_release(&mut self, token: KeyToken) -> bool {
        self.keys.remove(&token)
    }

    /// The combination formed by the held tokens
    pub fn current(&self) -> Combination {
        Combination::from_tokens(self.keys.iter().copied())
    }

    /// Forget every held key (the source lost track of releases)
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, token: KeyToken) -> bool {
        self.keys.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
