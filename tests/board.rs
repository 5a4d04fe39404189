//! Sound board tests
//!
//! Add/edit/remove validation, conflict detection, persistence and status
//! messages.

mod common;

use common::{audio_dir, audio_file, board_with, entry, status, MemoryStore};
use soundboard::keymap::Combination;
use soundboard::library::{EntryStore, JsonEntryStore};
use soundboard::{SoundBoard, SoundEntry, SoundboardError};

fn combo(s: &str) -> Combination {
    s.parse().unwrap()
}

// ========================================================================
// Conflict detection
// ========================================================================

#[test]
fn test_add_with_taken_keybind_rejected() {
    let dir = audio_dir();
    let (mut board, store) = board_with(vec![entry(&dir, "Horn", "CTRL+S")]);

    let err = board.add(entry(&dir, "Bell", "CTRL+S")).unwrap_err();

    assert_eq!(
        err,
        SoundboardError::KeybindConflict {
            keybind: "CTRL+S".to_string(),
            existing: "Horn".to_string(),
        }
    );
    assert_eq!(board.len(), 1);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_conflict_ignores_keybind_spelling() {
    let dir = audio_dir();
    let (mut board, _store) = board_with(vec![entry(&dir, "Horn", "CTRL+S")]);

    let err = board.add(entry(&dir, "Bell", "s+control")).unwrap_err();
    assert!(matches!(err, SoundboardError::KeybindConflict { .. }));
}

#[test]
fn test_edit_keeping_own_keybind_accepted() {
    let dir = audio_dir();
    let (mut board, store) = board_with(vec![
        entry(&dir, "Horn", "CTRL+S"),
        entry(&dir, "Bell", "CTRL+B"),
    ]);

    let mut draft = board.get(0).cloned().unwrap();
    draft.name = "Air Horn".to_string();
    board.edit(0, draft).unwrap();

    assert_eq!(board.get(0).unwrap().name, "Air Horn");
    assert_eq!(board.status().text(), "Updated: Air Horn");
    assert_eq!(store.saved()[0].name, "Air Horn");
}

#[test]
fn test_edit_onto_other_entries_keybind_rejected() {
    let dir = audio_dir();
    let (mut board, _store) = board_with(vec![
        entry(&dir, "Horn", "CTRL+S"),
        entry(&dir, "Bell", "CTRL+B"),
    ]);

    let mut draft = board.get(1).cloned().unwrap();
    draft.keybind = "CTRL+S".to_string();

    assert!(matches!(
        board.edit(1, draft),
        Err(SoundboardError::KeybindConflict { .. })
    ));
    assert_eq!(board.get(1).unwrap().keybind, "CTRL+B");
}

#[test]
fn test_identical_entries_excluded_by_position() {
    let dir = audio_dir();
    let path = audio_file(&dir, "horn.wav");
    let twin = SoundEntry::new("Horn", path, "CTRL+H");
    let (mut board, _store) = board_with(vec![twin.clone()]);

    // Same values, different position: still a conflict
    assert!(board.add(twin.clone()).is_err());
    // Same position: not a conflict
    assert!(board.edit(0, twin).is_ok());
}

#[test]
fn test_stop_all_chord_is_reserved() {
    let dir = audio_dir();
    let (mut board, _store) = board_with(vec![]);
    board
        .registry()
        .set_stop_all(Some(combo("CTRL+SHIFT+ESCAPE")));

    let err = board
        .add(entry(&dir, "Horn", "ctrl+shift+esc"))
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "Keybind CTRL+SHIFT+ESCAPE is already used by Stop all sounds"
    );
}

// ========================================================================
// Registry follows the board
// ========================================================================

#[test]
fn test_registry_tracks_mutations() {
    let dir = audio_dir();
    let (mut board, _store) = board_with(vec![]);
    let registry = board.registry();

    board.add(entry(&dir, "Horn", "CTRL+H")).unwrap();
    assert_eq!(
        registry.resolve(&combo("CTRL+H")).map(|e| e.name),
        Some("Horn".to_string())
    );

    let mut draft = board.get(0).cloned().unwrap();
    draft.keybind = "CTRL+J".to_string();
    board.edit(0, draft).unwrap();
    assert!(registry.resolve(&combo("CTRL+H")).is_none());
    assert!(registry.resolve(&combo("CTRL+J")).is_some());

    let removed = board.remove(0).unwrap();
    assert_eq!(removed.name, "Horn");
    assert!(registry.is_empty());
    assert_eq!(board.status().text(), "Removed: Horn");
}

// ========================================================================
// Persistence
// ========================================================================

#[test]
fn test_load_reports_count() {
    let dir = audio_dir();
    let (board, _store) = board_with(vec![
        entry(&dir, "Horn", "CTRL+H"),
        entry(&dir, "Bell", "CTRL+B"),
    ]);
    assert_eq!(board.status().text(), "Loaded 2 sounds");
    assert_eq!(board.registry().len(), 2);
}

#[test]
fn test_load_does_not_check_files() {
    let (board, _store) = board_with(vec![SoundEntry::new("Gone", "/snd/gone.wav", "F9")]);
    assert_eq!(board.len(), 1);
}

#[test]
fn test_every_mutation_saves() {
    let dir = audio_dir();
    let (mut board, store) = board_with(vec![]);

    board.add(entry(&dir, "Horn", "CTRL+H")).unwrap();
    board.add(entry(&dir, "Bell", "CTRL+B")).unwrap();
    let draft = board.get(1).cloned().unwrap();
    board.edit(1, draft).unwrap();
    board.remove(0).unwrap();

    assert_eq!(store.save_count(), 4);
    assert_eq!(store.saved().len(), 1);
    assert_eq!(store.saved()[0].name, "Bell");
}

#[test]
fn test_save_failure_keeps_change_and_reports() {
    let dir = audio_dir();
    let (mut board, store) = board_with(vec![]);
    store.fail_saves();

    board.add(entry(&dir, "Horn", "CTRL+H")).unwrap();

    assert_eq!(board.len(), 1);
    assert!(board.status().text().starts_with("Error: could not save sounds"));
}

#[test]
fn test_json_store_round_trip_through_board() {
    let dir = audio_dir();
    let library = dir.path().join("config/sounds.json");

    let mut board = SoundBoard::new(JsonEntryStore::new(&library), status());
    board.load();
    board.add(entry(&dir, "Horn", "h+ctrl")).unwrap();

    let mut reopened = SoundBoard::new(JsonEntryStore::new(&library), status());
    reopened.load();
    assert_eq!(reopened.entries(), board.entries());
    assert_eq!(reopened.get(0).unwrap().keybind, "CTRL+H");
}

#[test]
fn test_unreadable_library_starts_empty() {
    let dir = audio_dir();
    let library = dir.path().join("sounds.json");
    std::fs::write(&library, "not json").unwrap();

    let mut board = SoundBoard::new(JsonEntryStore::new(&library), status());
    board.load();

    assert!(board.is_empty());
    assert!(board.status().text().starts_with("Error:"));
}

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryStore::default();
    let entries = vec![SoundEntry::new("Horn", "/snd/horn.wav", "CTRL+H")];
    store.save_entries(&entries).unwrap();
    assert_eq!(store.load_entries().unwrap(), entries);
}
