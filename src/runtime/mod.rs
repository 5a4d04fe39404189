//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window title status and hook wiring

pub mod app;

pub use app::App;
