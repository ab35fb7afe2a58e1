//! Optional on-disk configuration
//!
//! A small TOML file covering the knobs that are not run state: the tick
//! interval, where the key-value store lives, and the hotkey bindings.
//! Absent or unreadable files fall back to defaults; a malformed file is
//! logged and ignored rather than failing startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::hotkeys::HotkeyBindings;

/// Top-level configuration for the timer host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Interval between elapsed-time refreshes, in milliseconds
    pub tick_interval_ms: u64,
    /// Directory for the file-backed store; `None` means the host decides
    pub data_dir: Option<PathBuf>,
    /// Key bindings for the three timer actions
    pub hotkeys: HotkeyBindings,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            data_dir: None,
            hotkeys: HotkeyBindings::default(),
        }
    }
}

impl TimerConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file is absent or malformed
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Malformed config at {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Tick interval as a [`Duration`]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
