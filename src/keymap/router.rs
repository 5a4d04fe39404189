//! DispatchRouter: turns key events from both sources into fired actions
//!
//! Each input source runs its own latch:
//!
//! ```text
//!          new token pressed, combination resolves
//!   Idle ─────────────────────────────────────────→ Fired
//!    ↑                                                │
//!    └──────────── release of a held token ───────────┘
//! ```
//!
//! While a source is `Fired`, key-repeat and extra keys added to the chord do
//! not fire again.

use super::combination::Combination;
use super::held::HeldKeySet;
use super::normalize::{normalize, RawKeyEvent};
use super::registry::{BoundAction, KeybindRegistry};
use super::types::{InputSource, KeyToken};

/// Latch state of one input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FireState {
    #[default]
    Idle,
    Fired,
}

/// An action triggered by a chord
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    pub source: InputSource,
    pub combination: Combination,
    pub action: BoundAction,
}

#[derive(Debug, Default)]
struct SourceState {
    held: HeldKeySet,
    fire: FireState,
}

impl SourceState {
    fn reset(&mut self) {
        self.held.clear();
        self.fire = FireState::Idle;
    }
}

/// Routes normalized key events from both sources to the shared registry
#[derive(Debug)]
pub struct DispatchRouter {
    registry: KeybindRegistry,
    window: SourceState,
    global: SourceState,
}

impl DispatchRouter {
    pub fn new(registry: KeybindRegistry) -> Self {
        Self {
            registry,
            window: SourceState::default(),
            global: SourceState::default(),
        }
    }

    /// Handle one raw event. Returns the action to perform, if any.
    pub fn handle(&mut self, event: &RawKeyEvent) -> Option<Fired> {
        let token = normalize(&event.key)?;
        let source = event.source();
        if event.pressed {
            self.press(source, token)
        } else {
            self.release(source, token);
            None
        }
    }

    /// Handle a press of an already normalized token
    pub fn press(&mut self, source: InputSource, token: KeyToken) -> Option<Fired> {
        let registry = &self.registry;
        let state = match source {
            InputSource::Window => &mut self.window,
            InputSource::Global => &mut self.global,
        };

        if !state.held.on_press(token) {
            return None;
        }
        if state.fire == FireState::Fired {
            return None;
        }

        let combination = state.held.current();
        let action = registry.resolve_action(&combination)?;

        tracing::debug!("{} chord {} fired", source, combination);
        state.fire = FireState::Fired;
        Some(Fired {
            source,
            combination,
            action,
        })
    }

    /// Handle a release of an already normalized token
    pub fn release(&mut self, source: InputSource, token: KeyToken) {
        let state = self.source_mut(source);
        if state.held.on_release(token) {
            state.fire = FireState::Idle;
        }
    }

    /// Forget everything held by a source (focus loss, hook restart)
    pub fn reset(&mut self, source: InputSource) {
        tracing::debug!("Resetting {} key state", source);
        self.source_mut(source).reset();
    }

    pub fn state(&self, source: InputSource) -> FireState {
        self.source_ref(source).fire
    }

    pub fn held(&self, source: InputSource) -> &HeldKeySet {
        &self.source_ref(source).held
    }

    /// The chord a source is latched on, if it fired and is still held
    pub fn fired_combination(&self, source: InputSource) -> Option<Combination> {
        let state = self.source_ref(source);
        match state.fire {
            FireState::Fired => Some(state.held.current()),
            FireState::Idle => None,
        }
    }

    /// The registry handle this router resolves against
    pub fn registry(&self) -> &KeybindRegistry {
        &self.registry
    }

    fn source_ref(&self, source: InputSource) -> &SourceState {
        match source {
            InputSource::Window => &self.window,
            InputSource::Global => &self.global,
        }
    }

    fn source_mut(&mut self, source: InputSource) -> &mut SourceState {
        match source {
            InputSource::Window => &mut self.window,
            InputSource::Global => &mut self.global,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::SoundEntry;

    const W: InputSource = InputSource::Window;
    const G: InputSource = InputSource::Global;

    fn router_with(bindings: &[(&str, &str)]) -> DispatchRouter {
        let entries: Vec<SoundEntry> = bindings
            .iter()
            .map(|(name, keybind)| SoundEntry::new(*name, format!("/snd/{}.wav", name), *keybind))
            .collect();
        let registry = KeybindRegistry::new();
        registry.rebuild(&entries);
        DispatchRouter::new(registry)
    }

    fn fired_name(fired: Option<Fired>) -> Option<String> {
        match fired?.action {
            BoundAction::Play(entry) => Some(entry.name),
            BoundAction::StopAll => Some("<stop all>".to_string()),
        }
    }

    #[test]
    fn test_chord_fires_once() {
        let mut router = router_with(&[("Horn", "CTRL+A")]);
        assert!(router.press(W, KeyToken::Ctrl).is_none());
        assert_eq!(
            fired_name(router.press(W, KeyToken::Letter('A'))),
            Some("Horn".to_string())
        );
        // Key-repeat
        for _ in 0..5 {
            assert!(router.press(W, KeyToken::Letter('A')).is_none());
        }
        assert_eq!(router.state(W), FireState::Fired);
    }

    #[test]
    fn test_superset_chord_does_not_retrigger() {
        let mut router = router_with(&[("Horn", "CTRL+A"), ("Bell", "CTRL+A+B")]);
        router.press(W, KeyToken::Ctrl);
        assert!(router.press(W, KeyToken::Letter('A')).is_some());
        assert!(router.press(W, KeyToken::Letter('B')).is_none());
    }

    #[test]
    fn test_release_and_reform_refires() {
        let mut router = router_with(&[("Horn", "CTRL+A")]);
        router.press(W, KeyToken::Ctrl);
        assert!(router.press(W, KeyToken::Letter('A')).is_some());

        router.release(W, KeyToken::Letter('A'));
        assert_eq!(router.state(W), FireState::Idle);
        assert!(router.held(W).contains(KeyToken::Ctrl));

        assert!(router.press(W, KeyToken::Letter('A')).is_some());
    }

    #[test]
    fn test_release_of_unheld_token_keeps_latch() {
        let mut router = router_with(&[("Horn", "CTRL+A")]);
        router.press(W, KeyToken::Ctrl);
        router.press(W, KeyToken::Letter('A'));
        router.release(W, KeyToken::Shift);
        assert_eq!(router.state(W), FireState::Fired);
    }

    #[test]
    fn test_miss_stays_idle() {
        let mut router = router_with(&[("Horn", "CTRL+A")]);
        assert!(router.press(W, KeyToken::Letter('A')).is_none());
        assert_eq!(router.state(W), FireState::Idle);
        // Adding CTRL after A still forms CTRL+A
        assert!(router.press(W, KeyToken::Ctrl).is_some());
    }

    #[test]
    fn test_sources_are_independent() {
        let mut router = router_with(&[("Horn", "CTRL+A")]);
        router.press(W, KeyToken::Ctrl);
        assert!(router.press(G, KeyToken::Letter('A')).is_none());
        assert!(router.held(G).contains(KeyToken::Letter('A')));
        assert!(!router.held(W).contains(KeyToken::Letter('A')));

        router.press(G, KeyToken::Ctrl);
        assert_eq!(router.state(G), FireState::Fired);
        assert_eq!(router.state(W), FireState::Idle);
    }

    #[test]
    fn test_reset_clears_stuck_keys() {
        let mut router = router_with(&[("Horn", "A")]);
        router.press(W, KeyToken::Ctrl);
        router.reset(W);
        assert!(router.held(W).is_empty());
        assert_eq!(
            fired_name(router.press(W, KeyToken::Letter('A'))),
            Some("Horn".to_string())
        );
    }

    #[test]
    fn test_stop_all_chord_fires() {
        let mut router = router_with(&[]);
        router
            .registry()
            .set_stop_all(Some("CTRL+SHIFT+ESCAPE".parse().expect("valid")));
        router.press(G, KeyToken::Shift);
        router.press(G, KeyToken::Ctrl);
        assert_eq!(
            fired_name(router.press(G, KeyToken::Escape)),
            Some("<stop all>".to_string())
        );
    }
}
