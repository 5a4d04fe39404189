//! Keybind dispatch engine
//!
//! This module turns raw key events from two independent input sources into
//! bound actions:
//! - Normalizes window (winit) and global (device_query) keys into one token space
//! - Tracks held keys per source and forms order-independent combinations
//! - Resolves combinations against an atomically swapped registry
//! - Fires each chord exactly once per physical press
//!
//! # Architecture
//!
//! ```text
//! RawKeyEvent → normalize() → HeldKeySet (per source) → DispatchRouter
//!                                                          │
//!                              KeybindRegistry::resolve ←──┘ → Fired { action }
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let registry = KeybindRegistry::new();
//! registry.rebuild(&entries);
//!
//! let mut router = DispatchRouter::new(registry.clone());
//! if let Some(fired) = router.handle(&event) {
//!     // play fired.action
//! }
//! ```

mod combination;
mod held;
mod normalize;
mod registry;
mod router;
mod types;
mod winit_adapter;

pub use combination::{Combination, KeybindParseError};
pub use held::HeldKeySet;
pub use normalize::{from_native_name, normalize, try_normalize, RawKey, RawKeyEvent};
pub use registry::{BoundAction, KeybindRegistry, STOP_ALL_NAME};
pub use router::{DispatchRouter, FireState, Fired};
pub use types::{InputSource, KeyToken};
pub use winit_adapter::{raw_event, token_from_physical};
