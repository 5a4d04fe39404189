//! Core types for the keymap system: KeyToken, InputSource

use std::fmt;
use std::str::FromStr;

use super::combination::KeybindParseError;

/// Where a key event came from
///
/// The two sources observe independent press/release streams, so each one
/// keeps its own held-key state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Key events delivered to the focused application window
    Window,
    /// System-wide key events from the global hook
    Global,
}

impl InputSource {
    /// The source that observes the same keyboard from the other side
    pub fn other(self) -> Self {
        match self {
            InputSource::Window => InputSource::Global,
            InputSource::Global => InputSource::Window,
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Window => write!(f, "window"),
            InputSource::Global => write!(f, "global"),
        }
    }
}

/// Canonical identifier for one physical key, independent of input source
///
/// The display names match the ones stored in sound libraries
/// (`CTRL`, `A`, `DIGIT1`, `F5`, `BACK_SPACE`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyToken {
    // Modifiers (left and right variants collapse into one token)
    Ctrl,
    Alt,
    Shift,
    Meta,

    /// A letter key, always uppercase ASCII
    Letter(char),
    /// Top-row digit 0-9
    Digit(u8),
    /// Function keys F1-F24
    F(u8),
    /// Numpad digit 0-9
    Numpad(u8),

    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Insert,
    CapsLock,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl KeyToken {
    /// Create a letter token, normalizing case. Returns None for non-letters.
    pub fn letter(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| KeyToken::Letter(c.to_ascii_uppercase()))
    }

    /// Create a top-row digit token
    pub fn digit(n: u8) -> Option<Self> {
        (n <= 9).then_some(KeyToken::Digit(n))
    }

    /// Create a function key token (F1-F24)
    pub fn function(n: u8) -> Option<Self> {
        (1..=24).contains(&n).then_some(KeyToken::F(n))
    }

    /// Check if this is a modifier key
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            KeyToken::Ctrl | KeyToken::Alt | KeyToken::Shift | KeyToken::Meta
        )
    }

    /// Position of a token inside a combination string.
    /// Modifiers come first in a fixed order, other keys follow by name.
    pub(crate) fn rank(self) -> u8 {
        match self {
            KeyToken::Ctrl => 0,
            KeyToken::Alt => 1,
            KeyToken::Shift => 2,
            KeyToken::Meta => 3,
            _ => 4,
        }
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Ctrl => write!(f, "CTRL"),
            KeyToken::Alt => write!(f, "ALT"),
            KeyToken::Shift => write!(f, "SHIFT"),
            KeyToken::Meta => write!(f, "META"),
            KeyToken::Letter(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyToken::Digit(n) => write!(f, "DIGIT{}", n),
            KeyToken::F(n) => write!(f, "F{}", n),
            KeyToken::Numpad(n) => write!(f, "NUMPAD{}", n),
            KeyToken::Space => write!(f, "SPACE"),
            KeyToken::Enter => write!(f, "ENTER"),
            KeyToken::Tab => write!(f, "TAB"),
            KeyToken::Escape => write!(f, "ESCAPE"),
            KeyToken::Backspace => write!(f, "BACK_SPACE"),
            KeyToken::Delete => write!(f, "DELETE"),
            KeyToken::Insert => write!(f, "INSERT"),
            KeyToken::CapsLock => write!(f, "CAPS"),
            KeyToken::Home => write!(f, "HOME"),
            KeyToken::End => write!(f, "END"),
            KeyToken::PageUp => write!(f, "PAGE_UP"),
            KeyToken::PageDown => write!(f, "PAGE_DOWN"),
            KeyToken::Up => write!(f, "UP"),
            KeyToken::Down => write!(f, "DOWN"),
            KeyToken::Left => write!(f, "LEFT"),
            KeyToken::Right => write!(f, "RIGHT"),
        }
    }
}

/// Parse one keybind part like "ctrl", "A", "digit1", "f5" or "page_up"
///
/// Matching is case-insensitive and accepts common aliases.
impl FromStr for KeyToken {
    type Err = KeybindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let part = s.trim().to_lowercase();
        let unknown = || KeybindParseError::UnknownKey(s.trim().to_string());

        // Single character: letter or digit
        let mut chars = part.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(token) = KeyToken::letter(c) {
                return Ok(token);
            }
            return c
                .to_digit(10)
                .and_then(|n| KeyToken::digit(n as u8))
                .ok_or_else(unknown);
        }

        if let Some(rest) = part.strip_prefix("digit") {
            return parse_number(rest).and_then(KeyToken::digit).ok_or_else(unknown);
        }
        if let Some(rest) = part.strip_prefix("numpad") {
            return parse_number(rest)
                .filter(|n| *n <= 9)
                .map(KeyToken::Numpad)
                .ok_or_else(unknown);
        }
        if let Some(rest) = part.strip_prefix('f') {
            if let Some(n) = parse_number(rest) {
                return KeyToken::function(n).ok_or_else(unknown);
            }
        }

        match part.as_str() {
            "ctrl" | "control" => Ok(KeyToken::Ctrl),
            "alt" | "option" | "opt" | "alt_graph" => Ok(KeyToken::Alt),
            "shift" => Ok(KeyToken::Shift),
            "meta" | "super" | "win" | "windows" | "cmd" | "command" => Ok(KeyToken::Meta),

            "space" => Ok(KeyToken::Space),
            "enter" | "return" => Ok(KeyToken::Enter),
            "tab" => Ok(KeyToken::Tab),
            "escape" | "esc" => Ok(KeyToken::Escape),
            "back_space" | "backspace" => Ok(KeyToken::Backspace),
            "delete" | "del" => Ok(KeyToken::Delete),
            "insert" | "ins" => Ok(KeyToken::Insert),
            "caps" | "capslock" | "caps_lock" => Ok(KeyToken::CapsLock),

            "home" => Ok(KeyToken::Home),
            "end" => Ok(KeyToken::End),
            "page_up" | "pageup" | "pgup" => Ok(KeyToken::PageUp),
            "page_down" | "pagedown" | "pgdn" => Ok(KeyToken::PageDown),
            "up" | "arrowup" => Ok(KeyToken::Up),
            "down" | "arrowdown" => Ok(KeyToken::Down),
            "left" | "arrowleft" => Ok(KeyToken::Left),
            "right" | "arrowright" => Ok(KeyToken::Right),

            _ => Err(unknown()),
        }
    }
}

fn parse_number(s: &str) -> Option<u8> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
