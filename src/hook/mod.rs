//! Global keyboard hook
//!
//! Polls the system keyboard state with `device_query` on a background thread
//! and turns the difference between two snapshots into press/release events
//! for the global input source.
//!
//! The hook is a scarce OS resource: it is acquired by [`GlobalHook::initialize`]
//! and released by [`GlobalHook::shutdown`] or on drop.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use device_query::{DeviceQuery, DeviceState};

use crate::error::SoundboardError;
use crate::keymap::{RawKey, RawKeyEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const INIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Receives raw events on the hook thread
pub type KeySink = Box<dyn Fn(RawKeyEvent) + Send>;

pub struct GlobalHook {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl GlobalHook {
    /// Install the hook. Events are delivered to `sink` on the hook thread.
    pub fn initialize(sink: KeySink) -> Result<Self, SoundboardError> {
        check_session()?;

        let stop = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let thread_stop = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("global-hotkeys".to_string())
            .spawn(move || {
                // DeviceState::new panics when no display server is reachable
                let device = match panic::catch_unwind(DeviceState::new) {
                    Ok(device) => device,
                    Err(_) => {
                        let _ = ready_tx.send(Err("cannot open the keyboard device".to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                poll_loop(&device, &thread_stop, &sink);
            })
            .map_err(|e| SoundboardError::HookRegistrationFailure(e.to_string()))?;

        let hook = Self {
            stop,
            thread: Some(thread),
        };

        match ready_rx.recv_timeout(INIT_TIMEOUT) {
            Ok(Ok(())) => {
                tracing::info!("Global keyboard hook installed");
                Ok(hook)
            }
            Ok(Err(reason)) => Err(SoundboardError::HookRegistrationFailure(reason)),
            Err(_) => Err(SoundboardError::HookRegistrationFailure(
                "keyboard hook did not start".to_string(),
            )),
        }
        // On error `hook` drops here, which stops and joins the thread
    }

    /// Release the hook and wait for the polling thread to exit
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("Global keyboard hook thread panicked");
            } else {
                tracing::info!("Global keyboard hook released");
            }
        }
    }
}

impl Drop for GlobalHook {
    fn drop(&mut self) {
        self.release();
    }
}

fn poll_loop(device: &DeviceState, stop: &AtomicBool, sink: &KeySink) {
    let mut previous: HashSet<String> = HashSet::new();

    while !stop.load(Ordering::Acquire) {
        let current: HashSet<String> = device
            .get_keys()
            .into_iter()
            .map(|key| format!("{:?}", key))
            .collect();

        if current != previous {
            for event in diff_snapshots(&previous, &current) {
                if panic::catch_unwind(AssertUnwindSafe(|| sink(event))).is_err() {
                    tracing::error!("Global key sink panicked, dropping event");
                }
            }
            previous = current;
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// Events that turn snapshot `previous` into snapshot `current`
///
/// Releases come before presses so a quick key swap between two polls never
/// looks like a chord of both keys.
pub fn diff_snapshots(previous: &HashSet<String>, current: &HashSet<String>) -> Vec<RawKeyEvent> {
    let mut released: Vec<&String> = previous.difference(current).collect();
    let mut pressed: Vec<&String> = current.difference(previous).collect();
    released.sort();
    pressed.sort();

    released
        .into_iter()
        .map(|name| RawKeyEvent::release(RawKey::Global(name.clone())))
        .chain(
            pressed
                .into_iter()
                .map(|name| RawKeyEvent::press(RawKey::Global(name.clone()))),
        )
        .collect()
}

/// Refuse sessions where system-wide key state cannot be read
fn check_session() -> Result<(), SoundboardError> {
    #[cfg(target_os = "linux")]
    {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some()
            || std::env::var("XDG_SESSION_TYPE")
                .map(|t| t.eq_ignore_ascii_case("wayland"))
                .unwrap_or(false);
        let x11 = std::env::var_os("DISPLAY").is_some();
        check_display_server(wayland, x11)?;
    }
    Ok(())
}

/// Global key state is only readable through X11 (or XWayland)
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn check_display_server(wayland: bool, x11: bool) -> Result<(), SoundboardError> {
    if wayland && !x11 {
        return Err(SoundboardError::HookRegistrationFailure(
            "Wayland sessions do not expose global key state".to_string(),
        ));
    }
    if wayland {
        tracing::warn!("Running under XWayland: global hotkeys may only see X11 windows");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_diff_reports_presses() {
        let events = diff_snapshots(&set(&[]), &set(&["LControl", "H"]));
        assert_eq!(
            events,
            vec![
                RawKeyEvent::press(RawKey::Global("H".to_string())),
                RawKeyEvent::press(RawKey::Global("LControl".to_string())),
            ]
        );
    }

    #[test]
    fn test_diff_releases_before_presses() {
        let events = diff_snapshots(&set(&["LControl", "A"]), &set(&["LControl", "B"]));
        assert_eq!(
            events,
            vec![
                RawKeyEvent::release(RawKey::Global("A".to_string())),
                RawKeyEvent::press(RawKey::Global("B".to_string())),
            ]
        );
    }

    #[test]
    fn test_pure_wayland_is_refused() {
        assert!(matches!(
            check_display_server(true, false),
            Err(SoundboardError::HookRegistrationFailure(_))
        ));
    }

    #[test]
    fn test_x11_and_xwayland_are_accepted() {
        assert!(check_display_server(false, true).is_ok());
        assert!(check_display_server(true, true).is_ok());
        assert!(check_display_server(false, false).is_ok());
    }

    #[test]
    fn test_diff_unchanged_is_empty() {
        let keys = set(&["LShift"]);
        assert!(diff_snapshots(&keys, &keys).is_empty());
    }
}
