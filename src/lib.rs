//! Splitcore
//!
//! Core library for a menu-bar speedrun timer: a pause-aware stopwatch over
//! an ordered list of named splits, with write-through persistence and a
//! change-notification channel for presentation collaborators.
//!
//! The crate is UI-free by design. A host application constructs a
//! [`SplitTimer`] over a [`Store`], subscribes for [`TimerEvent`]s, renders
//! [`format::status_line`] in its status indicator, and wires its key-event
//! hooks through [`hotkeys::HotkeyBindings`]. All timing logic lives here;
//! the host owns no state beyond windows and widgets.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use splitcore::{MemoryStore, SplitTimer};
//!
//! let timer = SplitTimer::new(Arc::new(MemoryStore::new()));
//! timer.start();
//! timer.split();
//! let state = timer.snapshot();
//! assert!(state.splits[0].time.is_some());
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod hotkeys;
pub mod store;

// Re-export commonly used types
pub use config::TimerConfig;
pub use core::{
    DisplayMode, Split, SplitId, SplitTimer, TimerCallback, TimerEvent, TimerState,
};
pub use error::{Result, StoreError};
pub use hotkeys::{HotkeyAction, HotkeyBindings, HotkeyScope};
pub use store::{FileStore, MemoryStore, Store};
