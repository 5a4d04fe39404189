//! Audio backend abstraction
//!
//! Implementations: [`KiraBackend`](super::KiraBackend) for real output, and a
//! recording mock in the integration tests.

use std::path::Path;

use anyhow::Result;

/// How a player stopped on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Reached the end of the media
    Finished,
    /// The backend gave up mid-playback
    Failed(String),
}

/// Called at most once, from a backend thread, when playback ends without
/// an explicit stop
pub type EndCallback = Box<dyn FnOnce(PlaybackOutcome) + Send>;

/// A live player instance
pub trait PlayerHandle: Send {
    /// Stop playback and release the player. After this the end callback
    /// must not fire.
    fn stop(&mut self);
}

/// Opens audio files and starts players
pub trait AudioBackend {
    /// Open `path` and start playing it from the beginning
    ///
    /// Runs on the dispatch thread: only opening the file may happen here,
    /// decoding must not. Decode errors found later are reported through
    /// `on_end` as [`PlaybackOutcome::Failed`]. `on_end` is only invoked if
    /// this returns `Ok`.
    fn start(&mut self, path: &Path, on_end: EndCallback) -> Result<Box<dyn PlayerHandle>>;
}
