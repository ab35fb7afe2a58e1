//! Events emitted by the split timer
//!
//! Presentation collaborators subscribe here instead of polling: the menu
//! bar label, the splits editor, and the settings form all re-render on
//! notification without the core knowing anything about rendering.

use std::time::Duration;

use super::state::DisplayMode;

/// Change notification published by [`SplitTimer`](super::timer::SplitTimer)
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// A new run began; all recorded times were cleared
    Started,
    /// The run passed a split and recorded its cumulative time
    SplitRecorded {
        /// Index of the split that was recorded
        index: usize,
        /// Name of the split at the time it was recorded
        name: String,
        /// Cumulative elapsed time recorded for it
        time: Duration,
    },
    /// The run passed its last split
    Finished {
        /// Final elapsed time of the run
        total: Duration,
    },
    /// The timer returned to the idle state
    Reset,
    /// The run was paused; elapsed time is frozen
    Paused,
    /// The run resumed from a pause
    Resumed,
    /// Periodic elapsed-time refresh
    Tick {
        /// Elapsed run time, excluding paused intervals
        elapsed: Duration,
    },
    /// Split membership, order, or a name changed via the editor
    SplitsEdited,
    /// The status display preference changed
    DisplayModeChanged(DisplayMode),
}

/// Callback type for timer events
pub type TimerCallback = Box<dyn Fn(&TimerEvent) + Send + Sync>;

/// Event handler that can have multiple listeners
pub struct EventHandler {
    callbacks: Vec<TimerCallback>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Add a callback for timer events
    pub fn subscribe(&mut self, callback: TimerCallback) {
        self.callbacks.push(callback);
    }

    /// Emit an event to all listeners
    pub fn emit(&self, event: &TimerEvent) {
        for callback in &self.callbacks {
            callback(event);
        }
    }

    /// Check if there are any listeners
    pub fn has_listeners(&self) -> bool {
        !self.callbacks.is_empty()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
