//! Combination: the canonical, order-independent string for a set of held keys

use std::fmt;
use std::str::FromStr;

use super::types::KeyToken;

/// A canonical key combination such as `CTRL+H` or `CTRL+ALT+DIGIT1`
///
/// Built from a set of tokens: duplicates are removed, modifiers come first
/// (CTRL, ALT, SHIFT, META) and the remaining keys follow sorted by name.
/// The same set of tokens always yields the same combination, whatever the
/// press order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Combination(String);

impl Combination {
    /// Build a combination from tokens in any order
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = KeyToken>,
    {
        let mut keyed: Vec<(u8, String)> = tokens
            .into_iter()
            .map(|token| (token.rank(), token.to_string()))
            .collect();
        keyed.sort();
        keyed.dedup();

        Combination(
            keyed
                .into_iter()
                .map(|(_, name)| name)
                .collect::<Vec<_>>()
                .join("+"),
        )
    }

    /// The canonical string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no keys are part of the combination
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a keybind string like "ctrl+shift+s" or "CTRL+ALT+H"
impl FromStr for Combination {
    type Err = KeybindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(KeybindParseError::Empty);
        }

        let tokens = s
            .split('+')
            .map(str::parse::<KeyToken>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Combination::from_tokens(tokens))
    }
}

/// Errors that can occur when parsing a keybind string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeybindParseError {
    Empty,
    UnknownKey(String),
}

impl fmt::Display for KeybindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeybindParseError::Empty => write!(f, "keybind is empty"),
            KeybindParseError::UnknownKey(k) if k.is_empty() => {
                write!(f, "keybind has an empty key")
            }
            KeybindParseError::UnknownKey(k) => write!(f, "unknown key \"{}\"", k),
        }
    }
}

impl std::error::Error for KeybindParseError {}
