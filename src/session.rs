//! Session: the running state of one soundboard instance

use crate::board::SoundBoard;
use crate::error::SoundboardError;
use crate::keymap::DispatchRouter;
use crate::library::EntryStore;
use crate::playback::{AudioBackend, PlaybackManager};
use crate::status::READY_WINDOW_ONLY;

/// Board, dispatch engine and players wired together
///
/// The router reads the board's registry handle, so add/edit/remove take
/// effect on the next key press without rebuilding the session.
pub struct Session<S: EntryStore, B: AudioBackend> {
    pub board: SoundBoard<S>,
    pub router: DispatchRouter,
    pub playback: PlaybackManager<B>,
    /// While the window has focus, chords fire from window events only
    pub window_focused: bool,
}

impl<S: EntryStore, B: AudioBackend> Session<S, B> {
    pub fn new(board: SoundBoard<S>, playback: PlaybackManager<B>) -> Self {
        let router = DispatchRouter::new(board.registry());
        Self {
            board,
            router,
            playback,
            window_focused: false,
        }
    }

    /// Take the outcome of installing the global hook
    ///
    /// On failure the error is shown once and the session keeps running with
    /// window hotkeys only.
    pub fn attach_hook<H>(&mut self, installed: Result<H, SoundboardError>) -> Option<H> {
        match installed {
            Ok(hook) => Some(hook),
            Err(e) => {
                tracing::warn!("{}", e);
                let status = self.board.status_mut();
                status.set_idle(READY_WINDOW_ONLY);
                status.set(e.user_message());
                None
            }
        }
    }

    /// Run without the global hook
    pub fn window_only(&mut self) {
        tracing::info!("Global hotkeys disabled");
        self.board.status_mut().set_idle(READY_WINDOW_ONLY);
    }

    /// Current status line text
    pub fn status_text(&self) -> &str {
        self.board.status().text()
    }

    /// Stop all players and release the backend
    pub fn shutdown(self) {
        self.playback.dispose();
    }
}
