//! PlaybackManager: at most one active player per audio file
//!
//! Players end in one of three ways: an explicit stop (including pre-emption by
//! a retrigger), natural end of media, or a backend error. The last two are
//! reported from backend threads; they remove the map entry only if it still
//! belongs to the player that ended, then notify the UI thread over a channel.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::backend::{AudioBackend, EndCallback, PlaybackOutcome, PlayerHandle};
use crate::entry::SoundEntry;
use crate::error::SoundboardError;

/// Identity of one player instance, unique per manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

/// A player that ended on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    Finished {
        id: PlayerId,
        name: String,
        path: PathBuf,
    },
    Failed {
        id: PlayerId,
        name: String,
        path: PathBuf,
        reason: String,
    },
}

impl PlaybackEvent {
    pub fn name(&self) -> &str {
        match self {
            PlaybackEvent::Finished { name, .. } | PlaybackEvent::Failed { name, .. } => name,
        }
    }

    /// The error to report, for failed players
    pub fn error(&self) -> Option<SoundboardError> {
        match self {
            PlaybackEvent::Finished { .. } => None,
            PlaybackEvent::Failed { path, reason, .. } => Some(SoundboardError::PlaybackFailure {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

struct ActivePlayer {
    id: PlayerId,
    name: String,
    /// None while the backend is still starting the player
    handle: Option<Box<dyn PlayerHandle>>,
}

type PlayerMap = HashMap<PathBuf, ActivePlayer>;

fn lock(players: &Mutex<PlayerMap>) -> MutexGuard<'_, PlayerMap> {
    players.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct PlaybackManager<B: AudioBackend> {
    backend: B,
    players: Arc<Mutex<PlayerMap>>,
    next_id: u64,
    events: Sender<PlaybackEvent>,
}

impl<B: AudioBackend> PlaybackManager<B> {
    /// Create a manager that reports ended players on `events`
    pub fn new(backend: B, events: Sender<PlaybackEvent>) -> Self {
        Self {
            backend,
            players: Arc::new(Mutex::new(HashMap::new())),
            next_id: 1,
            events,
        }
    }

    /// Create a manager together with the receiving end of its event channel
    pub fn with_channel(backend: B) -> (Self, Receiver<PlaybackEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(backend, tx), rx)
    }

    /// Start playing an entry from the beginning
    ///
    /// A player already registered for the same file is stopped first. Other
    /// files keep playing. On error nothing stays registered for this file.
    pub fn play(&mut self, entry: &SoundEntry) -> Result<PlayerId, SoundboardError> {
        let path = entry.path().to_path_buf();
        if !path.is_file() {
            tracing::warn!("Sound file not found: {}", path.display());
            return Err(SoundboardError::MissingResource(path));
        }

        if self.stop(&path) {
            tracing::debug!("Restarting {}", entry.name);
        }

        let id = PlayerId(self.next_id);
        self.next_id += 1;

        lock(&self.players).insert(
            path.clone(),
            ActivePlayer {
                id,
                name: entry.name.clone(),
                handle: None,
            },
        );

        let on_end = self.end_callback(path.clone(), id);
        match self.backend.start(&path, on_end) {
            Ok(handle) => {
                let orphan = {
                    let mut players = lock(&self.players);
                    match players.get_mut(&path) {
                        Some(player) if player.id == id => {
                            player.handle = Some(handle);
                            None
                        }
                        // Ended before we could attach it
                        _ => Some(handle),
                    }
                };
                if let Some(mut handle) = orphan {
                    handle.stop();
                }
                tracing::info!("Playing {} ({})", entry.name, path.display());
                Ok(id)
            }
            Err(e) => {
                remove_if_current(&self.players, &path, id);
                tracing::warn!("Failed to play {}: {:#}", path.display(), e);
                Err(SoundboardError::PlaybackFailure {
                    path,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Stop and release the player for `path`. Returns false if none was active.
    pub fn stop(&self, path: &Path) -> bool {
        let removed = lock(&self.players).remove(path);
        match removed {
            Some(player) => {
                tracing::debug!("Stopping {} ({:?})", player.name, player.id);
                release(player);
                true
            }
            None => false,
        }
    }

    /// Stop and release every player. Returns how many were active.
    pub fn stop_all(&self) -> usize {
        let drained: Vec<ActivePlayer> = lock(&self.players).drain().map(|(_, p)| p).collect();
        let count = drained.len();
        for player in drained {
            release(player);
        }
        if count > 0 {
            tracing::info!("Stopped {} sounds", count);
        }
        count
    }

    /// Stop everything and tear the manager down
    pub fn dispose(self) {
        tracing::debug!("Disposing playback manager");
        // Drop does the rest
    }

    pub fn is_playing(&self, path: &Path) -> bool {
        lock(&self.players).contains_key(path)
    }

    /// The player currently registered for `path`
    pub fn player_id(&self, path: &Path) -> Option<PlayerId> {
        lock(&self.players).get(path).map(|p| p.id)
    }

    pub fn active_count(&self) -> usize {
        lock(&self.players).len()
    }

    fn end_callback(&self, path: PathBuf, id: PlayerId) -> EndCallback {
        let players = Arc::downgrade(&self.players);
        let events = self.events.clone();
        Box::new(move |outcome| on_player_end(players, events, path, id, outcome))
    }
}

impl<B: AudioBackend> Drop for PlaybackManager<B> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// Runs on a backend thread when a player ends by itself
fn on_player_end(
    players: Weak<Mutex<PlayerMap>>,
    events: Sender<PlaybackEvent>,
    path: PathBuf,
    id: PlayerId,
    outcome: PlaybackOutcome,
) {
    let Some(players) = players.upgrade() else {
        return;
    };
    let Some(player) = remove_if_current(&players, &path, id) else {
        tracing::debug!("Ignoring end of replaced player {:?}", id);
        return;
    };
    let name = player.name;

    let event = match outcome {
        PlaybackOutcome::Finished => {
            tracing::debug!("Finished: {}", name);
            PlaybackEvent::Finished { id, name, path }
        }
        PlaybackOutcome::Failed(reason) => {
            tracing::warn!("Playback of {} failed: {}", name, reason);
            PlaybackEvent::Failed {
                id,
                name,
                path,
                reason,
            }
        }
    };

    // The receiver is gone during shutdown
    let _ = events.send(event);
}

/// Remove the entry for `path` only if it belongs to player `id`
fn remove_if_current(
    players: &Mutex<PlayerMap>,
    path: &Path,
    id: PlayerId,
) -> Option<ActivePlayer> {
    let mut players = lock(players);
    match players.get(path) {
        Some(player) if player.id == id => players.remove(path),
        _ => None,
    }
}

fn release(player: ActivePlayer) {
    if let Some(mut handle) = player.handle {
        handle.stop();
    }
}
