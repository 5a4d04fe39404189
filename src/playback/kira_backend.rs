//! Kira-based audio backend
//!
//! Sounds are streamed: `start` only opens and probes the file, decoding runs
//! on kira's decoder thread. Each started sound gets a small watcher thread
//! that polls the handle and reports the natural end of playback or a decode
//! error.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use kira::manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings};
use kira::sound::streaming::{StreamingSoundData, StreamingSoundHandle};
use kira::sound::FromFileError;
use kira::sound::PlaybackState;
use kira::tween::Tween;

use super::backend::{AudioBackend, EndCallback, PlaybackOutcome, PlayerHandle};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Audio output through the default cpal device
pub struct KiraBackend {
    manager: AudioManager,
}

impl KiraBackend {
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("Failed to create audio manager: {e}"))?;
        Ok(Self { manager })
    }
}

struct PlayerShared {
    handle: Mutex<StreamingSoundHandle<FromFileError>>,
    /// Set by an explicit stop; the watcher exits without reporting
    released: AtomicBool,
}

impl PlayerShared {
    fn stop(&self) {
        self.released.store(true, Ordering::Release);
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stop(Tween::default());
    }
}

struct KiraPlayer {
    shared: Arc<PlayerShared>,
}

impl PlayerHandle for KiraPlayer {
    fn stop(&mut self) {
        self.shared.stop();
    }
}

impl AudioBackend for KiraBackend {
    fn start(&mut self, path: &Path, on_end: EndCallback) -> Result<Box<dyn PlayerHandle>> {
        let data = StreamingSoundData::from_file(path)
            .map_err(|e| anyhow!("Failed to open sound {}: {e}", path.display()))?;
        let handle = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("Failed to play sound: {e:?}"))?;

        let shared = Arc::new(PlayerShared {
            handle: Mutex::new(handle),
            released: AtomicBool::new(false),
        });

        let watcher = Arc::clone(&shared);
        let spawned = thread::Builder::new()
            .name("playback-watch".to_string())
            .spawn(move || watch(watcher, on_end));
        if let Err(e) = spawned {
            shared.stop();
            return Err(anyhow!("Failed to spawn playback watcher: {e}"));
        }

        Ok(Box::new(KiraPlayer { shared }))
    }
}

fn watch(shared: Arc<PlayerShared>, on_end: EndCallback) {
    let outcome = loop {
        thread::sleep(POLL_INTERVAL);
        if shared.released.load(Ordering::Acquire) {
            return;
        }

        let mut handle = shared.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(error) = handle.pop_error() {
            // The decoder stops after an error; make sure the output does too
            handle.stop(Tween::default());
            break PlaybackOutcome::Failed(error.to_string());
        }
        if handle.state() == PlaybackState::Stopped {
            break PlaybackOutcome::Finished;
        }
    };

    if !shared.released.load(Ordering::Acquire) {
        on_end(outcome);
    }
}
