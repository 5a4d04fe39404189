//! Message types for the Elm-style architecture
//!
//! Everything that changes a running session flows through [`Msg`], whether it
//! comes from the window, the global hook thread or a playback thread.

use crate::keymap::RawKeyEvent;
use crate::playback::PlaybackEvent;

#[derive(Debug, Clone)]
pub enum Msg {
    /// A press or release from either input source
    Key(RawKeyEvent),
    /// The window gained (true) or lost (false) keyboard focus
    Focus(bool),
    /// Play the entry at this position
    Play(usize),
    /// Stop every active player
    StopAll,
    /// A player ended on its own
    Playback(PlaybackEvent),
    /// Periodic housekeeping (status line expiry)
    Tick,
}
