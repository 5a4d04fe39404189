//! Raw key events from both input sources, and their normalization to KeyTokens
//!
//! ```text
//! winit PhysicalKey ─┐
//!                    ├─→ RawKey ─→ normalize() ─→ Option<KeyToken>
//! device_query name ─┘
//! ```

use std::fmt;

use winit::keyboard::PhysicalKey;

use super::types::{InputSource, KeyToken};
use super::winit_adapter::token_from_physical;
use crate::error::SoundboardError;

/// A platform key identifier, tagged with the source vocabulary it comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawKey {
    /// Physical key from a focused-window keyboard event
    Window(PhysicalKey),
    /// Key name from the global hook (device_query `Keycode` names like
    /// `LControl`, `Key1`, `H`)
    Global(String),
}

impl RawKey {
    pub fn source(&self) -> InputSource {
        match self {
            RawKey::Window(_) => InputSource::Window,
            RawKey::Global(_) => InputSource::Global,
        }
    }
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawKey::Window(key) => write!(f, "window:{:?}", key),
            RawKey::Global(name) => write!(f, "global:{}", name),
        }
    }
}

/// One press or release as delivered by an input adapter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub key: RawKey,
    pub pressed: bool,
}

impl RawKeyEvent {
    pub fn press(key: RawKey) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: RawKey) -> Self {
        Self {
            key,
            pressed: false,
        }
    }

    pub fn source(&self) -> InputSource {
        self.key.source()
    }
}

/// Map a raw key to its canonical token
///
/// Unmapped keys (media keys, punctuation, ...) yield `None` and are logged
/// at debug level. Callers treat `None` as a no-op.
pub fn normalize(raw: &RawKey) -> Option<KeyToken> {
    match try_normalize(raw) {
        Ok(token) => Some(token),
        Err(e) => {
            tracing::debug!("Ignoring key: {}", e);
            None
        }
    }
}

/// Like [`normalize`], but reports unmapped keys as `InvalidKeyMapping`
pub fn try_normalize(raw: &RawKey) -> Result<KeyToken, SoundboardError> {
    let token = match raw {
        RawKey::Window(physical) => token_from_physical(*physical),
        RawKey::Global(name) => from_native_name(name),
    };
    token.ok_or_else(|| SoundboardError::InvalidKeyMapping(raw.to_string()))
}

/// Static table for global hook key names
///
/// Left/right modifier variants collapse into one token so a chord held with
/// either hand resolves the same way.
pub fn from_native_name(name: &str) -> Option<KeyToken> {
    let token = match name {
        "LControl" | "RControl" => KeyToken::Ctrl,
        "LShift" | "RShift" => KeyToken::Shift,
        "LAlt" | "RAlt" | "LOption" | "ROption" => KeyToken::Alt,
        "LMeta" | "RMeta" | "Command" | "RCommand" => KeyToken::Meta,

        "Space" => KeyToken::Space,
        "Enter" => KeyToken::Enter,
        "Tab" => KeyToken::Tab,
        "Escape" => KeyToken::Escape,
        "Backspace" => KeyToken::Backspace,
        "Delete" => KeyToken::Delete,
        "Insert" => KeyToken::Insert,
        "CapsLock" => KeyToken::CapsLock,

        "Home" => KeyToken::Home,
        "End" => KeyToken::End,
        "PageUp" => KeyToken::PageUp,
        "PageDown" => KeyToken::PageDown,
        "Up" => KeyToken::Up,
        "Down" => KeyToken::Down,
        "Left" => KeyToken::Left,
        "Right" => KeyToken::Right,

        _ => return numbered_native_name(name),
    };
    Some(token)
}

fn numbered_native_name(name: &str) -> Option<KeyToken> {
    if let Some(rest) = name.strip_prefix("Numpad") {
        return single_digit(rest).map(KeyToken::Numpad);
    }
    if let Some(rest) = name.strip_prefix("Key") {
        return single_digit(rest).and_then(KeyToken::digit);
    }
    if let Some(rest) = name.strip_prefix('F') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return rest.parse().ok().and_then(KeyToken::function);
        }
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => KeyToken::letter(c),
        _ => None,
    }
}

fn single_digit(s: &str) -> Option<u8> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}
