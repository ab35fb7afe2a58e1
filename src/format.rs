//! Status display text
//!
//! Durations render as `MM:SS` or `MM:SS.cc` (hundredths); the status line
//! combines the total time and the current split name according to the
//! persisted display mode. All text here is plain strings, ready for
//! whatever indicator the host UI uses.

use std::time::Duration;

use crate::core::{DisplayMode, TimerState};

/// Format a duration as `MM:SS`
pub fn format_mmss(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a duration as `MM:SS.cc` with hundredths
pub fn format_mmss_centis(d: Duration) -> String {
    let total = d.as_secs();
    let centis = d.subsec_millis() / 10;
    format!("{:02}:{:02}.{:02}", total / 60, total % 60, centis)
}

/// The split half of the status line: the current split name while running,
/// `"Done"` past the last split, otherwise the current-or-last known name
/// (empty when there are no splits).
pub fn split_label(state: &TimerState) -> String {
    if state.running {
        match state.splits.get(state.current_split_index) {
            Some(split) => split.name.clone(),
            None => "Done".to_string(),
        }
    } else if state.splits.is_empty() {
        String::new()
    } else {
        let index = state.current_split_index.min(state.splits.len() - 1);
        state.splits[index].name.clone()
    }
}

/// Render the status-bar line for the current display mode.
///
/// The status bar always uses the `MM:SS` form; the centisecond variant is
/// a per-view toggle, not a persisted preference.
pub fn status_line(state: &TimerState) -> String {
    let time_part = format_mmss(state.elapsed);
    match state.display_mode {
        DisplayMode::Total => time_part,
        DisplayMode::Split => split_label(state),
        DisplayMode::Both => format!("{} | {}", time_part, split_label(state)),
    }
}
