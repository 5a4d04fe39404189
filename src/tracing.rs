//! Logging setup
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=soundboard::keymap=debug` - chord formation and registry swaps
//! - `RUST_LOG=soundboard::playback=debug` - player start/stop/end
//!
//! # Log Files
//!
//! Logs are written to `~/.config/soundboard/logs/soundboard.log` with daily
//! rotation, at debug level for our own modules. The audio stack below kira
//! logs every decoded packet at debug, so it is capped at `warn` there.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;

/// Console filter when RUST_LOG is not set
const CONSOLE_FILTER: &str = "warn";

/// File filter: everything of ours, only problems from the audio stack
const FILE_FILTER: &str = "debug,symphonia=warn,symphonia_core=warn,cpal=warn,kira=info";

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. Hook and
/// playback-watch threads are named, so file lines carry the thread name.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_FILTER));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer())
        .init();
}

/// Daily-rotated file layer, or None (with a warning) if the logs dir is unusable
fn file_layer<S>() -> Option<impl Layer<S>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let logs_dir = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            return None;
        }
    };

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    Some(
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(FILE_FILTER)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        assert!(EnvFilter::try_new(CONSOLE_FILTER).is_ok());
        assert!(EnvFilter::try_new(FILE_FILTER).is_ok());
    }
}
