//! Status line: an idle message plus short-lived transient messages

use std::time::{Duration, Instant};

/// Idle message when the global hook is running
pub const READY_GLOBAL: &str = "Ready - Global hotkeys active!";
/// Idle message when only in-window hotkeys work
pub const READY_WINDOW_ONLY: &str = "Ready - window hotkeys only";

/// A transient message with expiration time
#[derive(Debug, Clone)]
pub struct TransientMessage {
    /// The message text
    pub text: String,
    /// When this message expires
    pub expires_at: Instant,
}

impl TransientMessage {
    /// Create a new transient message with the given duration
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    /// Check if this message has expired at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// What the UI shows as the current status
///
/// Each new message replaces the previous one and restarts the timer, so a
/// message only auto-clears if it is still the current one.
#[derive(Debug, Clone)]
pub struct StatusLine {
    idle: String,
    timeout: Duration,
    transient: Option<TransientMessage>,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(READY_GLOBAL, Duration::from_secs(3))
    }
}

impl StatusLine {
    pub fn new(idle: impl Into<String>, timeout: Duration) -> Self {
        Self {
            idle: idle.into(),
            timeout,
            transient: None,
        }
    }

    /// Show a message until the timeout passes
    pub fn set(&mut self, text: impl Into<String>) {
        let message = TransientMessage::new(text, self.timeout);
        tracing::debug!("Status: {}", message.text);
        self.transient = Some(message);
    }

    /// Change the message shown when nothing transient is active
    pub fn set_idle(&mut self, idle: impl Into<String>) {
        self.idle = idle.into();
    }

    /// The text to display right now
    pub fn text(&self) -> &str {
        self.transient
            .as_ref()
            .map(|m| m.text.as_str())
            .unwrap_or(&self.idle)
    }

    pub fn idle(&self) -> &str {
        &self.idle
    }

    pub fn has_transient(&self) -> bool {
        self.transient.is_some()
    }

    /// Drop the transient message if it expired. Returns true if the
    /// displayed text changed.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match &self.transient {
            Some(message) if message.is_expired_at(now) => {
                self.transient = None;
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }
}
