//! Hotkey contract
//!
//! The timer itself never talks to the OS. This module defines the hotkey
//! contract as data: which actions exist, which keys trigger them by
//! default, and the scoped-resource shape an OS-level hook implementation
//! must follow (install on activation, release deterministically on drop).
//! Hosts plug in a platform backend; tests use [`NoopHook`].

use serde::{Deserialize, Serialize};

use crate::core::SplitTimer;
use crate::error::Result;

/// Timer operations that can be bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    /// Start when idle, split when running
    SplitOrStart,
    /// Return to idle
    Reset,
    /// Pause or resume the run
    TogglePause,
}

impl HotkeyAction {
    /// Dispatch this action onto a timer
    pub fn dispatch(&self, timer: &SplitTimer) {
        match self {
            HotkeyAction::SplitOrStart => timer.split_or_start(),
            HotkeyAction::Reset => timer.reset(),
            HotkeyAction::TogglePause => timer.toggle_pause(),
        }
    }
}

/// Whether a binding fires process-wide or only while the timer view has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyScope {
    /// Fires even when the application is not focused
    Global,
    /// Fires only while a specific view has focus
    Focused,
}

/// Key bindings for the three timer actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyBindings {
    /// Global key for the advance action
    pub split_or_start: String,
    /// Global key for reset
    pub reset: String,
    /// Focused-only key for pause/resume
    pub toggle_pause: String,
}

impl Default for HotkeyBindings {
    fn default() -> Self {
        Self {
            split_or_start: "=".to_string(),
            reset: "-".to_string(),
            toggle_pause: "\\".to_string(),
        }
    }
}

impl HotkeyBindings {
    /// Resolve a pressed key within a scope to its bound action.
    ///
    /// Global bindings also fire in the focused scope; the pause binding is
    /// focused-only.
    pub fn action_for(&self, key: &str, scope: HotkeyScope) -> Option<HotkeyAction> {
        if key == self.split_or_start {
            return Some(HotkeyAction::SplitOrStart);
        }
        if key == self.reset {
            return Some(HotkeyAction::Reset);
        }
        if scope == HotkeyScope::Focused && key == self.toggle_pause {
            return Some(HotkeyAction::TogglePause);
        }
        None
    }
}

/// OS-level key-event hook, modeled as a scoped resource.
///
/// `install` acquires the hook and returns a guard; dropping the guard must
/// release the hook regardless of exit path.
pub trait HotkeyHook {
    /// The guard type that owns the installed hook
    type Guard;

    /// Install the hook for the given bindings
    fn install(&self, bindings: &HotkeyBindings) -> Result<Self::Guard>;
}

/// Hook implementation that captures nothing; for headless and test use
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

/// Guard for [`NoopHook`]; releasing it is a no-op
#[derive(Debug)]
pub struct NoopGuard(());

impl HotkeyHook for NoopHook {
    type Guard = NoopGuard;

    fn install(&self, _bindings: &HotkeyBindings) -> Result<NoopGuard> {
        Ok(NoopGuard(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_default_bindings() {
        let bindings = HotkeyBindings::default();
        assert_eq!(bindings.split_or_start, "=");
        assert_eq!(bindings.reset, "-");
        assert_eq!(bindings.toggle_pause, "\\");
    }

    #[test]
    fn test_action_resolution() {
        let bindings = HotkeyBindings::default();
        assert_eq!(
            bindings.action_for("=", HotkeyScope::Global),
            Some(HotkeyAction::SplitOrStart)
        );
        assert_eq!(
            bindings.action_for("-", HotkeyScope::Global),
            Some(HotkeyAction::Reset)
        );
        assert_eq!(bindings.action_for("x", HotkeyScope::Global), None);
    }

    #[test]
    fn test_pause_binding_is_focused_only() {
        let bindings = HotkeyBindings::default();
        assert_eq!(bindings.action_for("\\", HotkeyScope::Global), None);
        assert_eq!(
            bindings.action_for("\\", HotkeyScope::Focused),
            Some(HotkeyAction::TogglePause)
        );
    }

    #[test]
    fn test_dispatch_drives_timer() {
        let timer = SplitTimer::new(Arc::new(MemoryStore::new()));
        HotkeyAction::SplitOrStart.dispatch(&timer);
        assert!(timer.is_running());

        HotkeyAction::TogglePause.dispatch(&timer);
        assert!(timer.snapshot().paused);

        HotkeyAction::Reset.dispatch(&timer);
        let state = timer.snapshot();
        assert!(!state.running);
        assert!(!state.paused);
    }

    #[test]
    fn test_noop_hook_installs() {
        let hook = NoopHook;
        assert!(hook.install(&HotkeyBindings::default()).is_ok());
    }
}
