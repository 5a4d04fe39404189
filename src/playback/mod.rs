//! Playback lifecycle: per-file players with restart-on-retrigger

mod backend;
mod kira_backend;
mod manager;

pub use backend::{AudioBackend, EndCallback, PlaybackOutcome, PlayerHandle};
pub use kira_backend::KiraBackend;
pub use manager::{PlaybackEvent, PlaybackManager, PlayerId};
