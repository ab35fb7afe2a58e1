//! Core split timer abstractions
//!
//! This module contains the main types for the timer:
//! - `TimerState` - Pure state machine for splits and run progress
//! - `SplitTimer` - Shared runner with persistence and the periodic tick
//! - `TimerEvent` - Events emitted on state changes

mod events;
mod split;
mod state;
mod timer;

pub use events::{EventHandler, TimerCallback, TimerEvent};
pub use split::{Split, SplitId};
pub use state::{DisplayMode, SplitOutcome, TimerState};
pub use timer::{SplitTimer, DEFAULT_TICK_INTERVAL};
