//! Update function for the Elm-style architecture
//!
//! All session state transitions flow through [`update`]. It runs on the UI
//! thread only; other threads send it messages.

use crate::entry::SoundEntry;
use crate::error::SoundboardError;
use crate::keymap::{BoundAction, DispatchRouter, Fired, InputSource, RawKeyEvent};
use crate::library::EntryStore;
use crate::messages::Msg;
use crate::playback::{AudioBackend, PlaybackEvent};
use crate::session::Session;

/// Main update function - dispatches to sub-handlers
pub fn update<S: EntryStore, B: AudioBackend>(session: &mut Session<S, B>, msg: Msg) {
    match msg {
        Msg::Key(event) => update_key(session, &event),
        Msg::Focus(focused) => update_focus(session, focused),
        Msg::Play(index) => match session.board.get(index).cloned() {
            Some(entry) => play_entry(session, &entry),
            None => {
                tracing::warn!("No sound at position {}", index + 1);
                let message = SoundboardError::NoSuchEntry(index).user_message();
                session.board.status_mut().set(message);
            }
        },
        Msg::StopAll => stop_all(session),
        Msg::Playback(event) => update_playback(session, event),
        Msg::Tick => {
            session.board.status_mut().tick();
        }
    }
}

fn update_key<S: EntryStore, B: AudioBackend>(session: &mut Session<S, B>, event: &RawKeyEvent) {
    // Both sources are always tracked so their held sets stay accurate
    let Some(fired) = session.router.handle(event) else {
        return;
    };

    // While focused, one physical chord reaches both sources
    if session.window_focused && is_duplicate(&session.router, &fired) {
        tracing::debug!(
            "{} chord {} already fired from the {} source",
            fired.source,
            fired.combination,
            fired.source.other()
        );
        return;
    }

    match fired.action {
        BoundAction::Play(entry) => play_entry(session, &entry),
        BoundAction::StopAll => stop_all(session),
    }
}

fn is_duplicate(router: &DispatchRouter, fired: &Fired) -> bool {
    router.fired_combination(fired.source.other()).as_ref() == Some(&fired.combination)
}

fn update_focus<S: EntryStore, B: AudioBackend>(session: &mut Session<S, B>, focused: bool) {
    session.window_focused = focused;
    if !focused {
        // Releases that happen while unfocused are never delivered
        session.router.reset(InputSource::Window);
    }
}

fn update_playback<S: EntryStore, B: AudioBackend>(
    session: &mut Session<S, B>,
    event: PlaybackEvent,
) {
    match event.error() {
        Some(error) => session.board.status_mut().set(error.user_message()),
        None => tracing::info!("Finished: {}", event.name()),
    }
}

fn play_entry<S: EntryStore, B: AudioBackend>(session: &mut Session<S, B>, entry: &SoundEntry) {
    let message = match session.playback.play(entry) {
        Ok(_) => format!("Playing: {}", entry.name),
        Err(e) => e.user_message(),
    };
    session.board.status_mut().set(message);
}

fn stop_all<S: EntryStore, B: AudioBackend>(session: &mut Session<S, B>) {
    session.playback.stop_all();
    session.board.status_mut().set("All sounds stopped");
}
