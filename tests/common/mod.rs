//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use tempfile::TempDir;

use soundboard::error::ConfigError;
use soundboard::library::EntryStore;
use soundboard::playback::{
    AudioBackend, EndCallback, PlaybackEvent, PlaybackManager, PlaybackOutcome, PlayerHandle,
};
use soundboard::status::{StatusLine, READY_GLOBAL};
use soundboard::{Session, SoundBoard, SoundEntry};

// ============================================================================
// Mock audio backend
// ============================================================================

struct MockPlayer {
    path: PathBuf,
    stopped: Arc<AtomicBool>,
    on_end: Option<EndCallback>,
}

#[derive(Default)]
struct MockState {
    players: Vec<MockPlayer>,
    fail_paths: HashSet<PathBuf>,
}

/// Records every started player; clones share the same record
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

struct MockHandle {
    stopped: Arc<AtomicBool>,
}

impl PlayerHandle for MockHandle {
    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

impl AudioBackend for MockBackend {
    fn start(&mut self, path: &Path, on_end: EndCallback) -> Result<Box<dyn PlayerHandle>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_paths.contains(path) {
            return Err(anyhow!("unsupported format"));
        }

        let stopped = Arc::new(AtomicBool::new(false));
        state.players.push(MockPlayer {
            path: path.to_path_buf(),
            stopped: Arc::clone(&stopped),
            on_end: Some(on_end),
        });
        Ok(Box::new(MockHandle { stopped }))
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `start` fail for this file
    pub fn fail_path(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().fail_paths.insert(path.into());
    }

    /// Number of players started so far
    pub fn start_count(&self) -> usize {
        self.state.lock().unwrap().players.len()
    }

    /// Files of every started player, in start order
    pub fn started(&self) -> Vec<PathBuf> {
        let state = self.state.lock().unwrap();
        state.players.iter().map(|p| p.path.clone()).collect()
    }

    /// Whether the n-th started player was stopped through its handle
    pub fn is_stopped(&self, n: usize) -> bool {
        self.state.lock().unwrap().players[n].stopped.load(Ordering::SeqCst)
    }

    /// Simulate the n-th player reaching the end of its media
    pub fn finish(&self, n: usize) {
        self.end(n, PlaybackOutcome::Finished);
    }

    /// Simulate the n-th player failing mid-playback
    pub fn fail(&self, n: usize, reason: &str) {
        self.end(n, PlaybackOutcome::Failed(reason.to_string()));
    }

    fn end(&self, n: usize, outcome: PlaybackOutcome) {
        // Run the callback without holding our lock, like a real backend thread
        let callback = self.state.lock().unwrap().players[n].on_end.take();
        if let Some(callback) = callback {
            callback(outcome);
        }
    }
}

// ============================================================================
// In-memory entry store
// ============================================================================

#[derive(Default)]
struct MemoryState {
    entries: Vec<SoundEntry>,
    saves: usize,
    fail_saves: bool,
}

/// Entry store kept in memory; clones share the same contents
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn with_entries(entries: Vec<SoundEntry>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().entries = entries;
        store
    }

    pub fn saved(&self) -> Vec<SoundEntry> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn save_count(&self) -> usize {
        self.state.lock().unwrap().saves
    }

    pub fn fail_saves(&self) {
        self.state.lock().unwrap().fail_saves = true;
    }
}

impl EntryStore for MemoryStore {
    fn load_entries(&self) -> std::result::Result<Vec<SoundEntry>, ConfigError> {
        Ok(self.saved())
    }

    fn save_entries(&self, entries: &[SoundEntry]) -> std::result::Result<(), ConfigError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_saves {
            return Err(ConfigError::IoError("disk full".to_string()));
        }
        state.entries = entries.to_vec();
        state.saves += 1;
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Directory holding fake audio files
pub fn audio_dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Create a (fake) audio file and return its path as stored in entries
pub fn audio_file(dir: &TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, b"RIFF....WAVE").expect("write audio file");
    path.to_string_lossy().to_string()
}

/// An entry whose file exists in `dir`
pub fn entry(dir: &TempDir, name: &str, keybind: &str) -> SoundEntry {
    let file = format!("{}.wav", name.to_lowercase());
    SoundEntry::new(name, audio_file(dir, &file), keybind)
}

pub fn status() -> StatusLine {
    StatusLine::new(READY_GLOBAL, Duration::from_secs(3))
}

/// A loaded board over an in-memory store
pub fn board_with(entries: Vec<SoundEntry>) -> (SoundBoard<MemoryStore>, MemoryStore) {
    let store = MemoryStore::with_entries(entries);
    let mut board = SoundBoard::new(store.clone(), status());
    board.load();
    (board, store)
}

pub struct TestSession {
    pub session: Session<MemoryStore, MockBackend>,
    pub backend: MockBackend,
    pub store: MemoryStore,
    pub events: Receiver<PlaybackEvent>,
}

/// A full session over an in-memory store and the mock backend
pub fn session_with(entries: Vec<SoundEntry>) -> TestSession {
    let (board, store) = board_with(entries);
    let backend = MockBackend::new();
    let (playback, events) = PlaybackManager::with_channel(backend.clone());

    TestSession {
        session: Session::new(board, playback),
        backend,
        store,
        events,
    }
}
