//! Timer state machine
//!
//! `TimerState` is the pure core of the speedrun timer: an ordered list of
//! splits plus the running/paused/elapsed bookkeeping for the current run.
//! Every operation that depends on wall time takes an explicit `Instant`, so
//! the whole machine is deterministic under test. Invalid calls are silent
//! no-ops; nothing here returns an error.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::split::{Split, SplitId};

/// What the status indicator shows: total time, current split name, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Total,
    Split,
    #[default]
    Both,
}

impl DisplayMode {
    /// The persisted tag string for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Total => "total",
            DisplayMode::Split => "split",
            DisplayMode::Both => "both",
        }
    }

    /// Parse a persisted tag string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "total" => Some(DisplayMode::Total),
            "split" => Some(DisplayMode::Split),
            "both" => Some(DisplayMode::Both),
            _ => None,
        }
    }
}

/// Outcome of a `split()` call, so callers can react without re-inspecting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The call was a guarded no-op (not running, or no splits left)
    Ignored,
    /// A split time was recorded at this index; the run continues
    Recorded(usize),
    /// A split time was recorded at this index and it was the last one
    Finished(usize),
}

/// Current state of the split timer
#[derive(Debug, Clone)]
pub struct TimerState {
    /// Ordered splits; insertion order defines run order
    pub splits: Vec<Split>,
    /// Index of the next split to record; equals `splits.len()` once the run
    /// has passed every split
    pub current_split_index: usize,
    /// Whether a run is in progress
    pub running: bool,
    /// Whether the in-progress run is paused (implies `running`)
    pub paused: bool,
    /// Instant the run started, adjusted forward on resume so that
    /// `now - start_time` excludes paused intervals
    pub start_time: Option<Instant>,
    /// Elapsed run time as of the last tick, excluding paused intervals
    pub elapsed: Duration,
    /// Display preference for the status indicator
    pub display_mode: DisplayMode,
    /// Elapsed value captured at pause, re-applied on resume
    pause_offset: Duration,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Create an idle state with no splits
    pub fn new() -> Self {
        Self {
            splits: Vec::new(),
            current_split_index: 0,
            running: false,
            paused: false,
            start_time: None,
            elapsed: Duration::ZERO,
            display_mode: DisplayMode::default(),
            pause_offset: Duration::ZERO,
        }
    }

    /// Begin a new run at `now`, discarding any run in progress.
    ///
    /// Clears every recorded split time and rewinds the index to the first
    /// split. Valid from any state.
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.paused = false;
        self.start_time = Some(now);
        self.current_split_index = 0;
        self.elapsed = Duration::ZERO;
        self.pause_offset = Duration::ZERO;
        for split in &mut self.splits {
            split.time = None;
        }
    }

    /// Record the current elapsed time against the current split and advance.
    ///
    /// No-op unless a run is in progress with splits remaining. Passing the
    /// last split ends the run; `elapsed` keeps its final value so the total
    /// stays visible until the next start.
    pub fn split(&mut self) -> SplitOutcome {
        if !self.running || self.current_split_index >= self.splits.len() {
            return SplitOutcome::Ignored;
        }

        let index = self.current_split_index;
        self.splits[index].time = Some(self.elapsed);
        self.current_split_index += 1;

        if self.current_split_index >= self.splits.len() {
            self.running = false;
            self.paused = false;
            SplitOutcome::Finished(index)
        } else {
            SplitOutcome::Recorded(index)
        }
    }

    /// Return to the canonical idle state, clearing all run progress
    pub fn reset(&mut self) {
        self.running = false;
        self.paused = false;
        self.start_time = None;
        self.elapsed = Duration::ZERO;
        self.current_split_index = 0;
        self.pause_offset = Duration::ZERO;
        for split in &mut self.splits {
            split.time = None;
        }
    }

    /// Pause or resume the run at `now`.
    ///
    /// No-op when not running. Pausing freezes `elapsed`; resuming rebases
    /// `start_time` to `now - pause_offset` so elapsed continues from where
    /// it left off and the paused interval never counts toward the run.
    /// Returns the new paused flag, or `None` if the call was ignored.
    pub fn toggle_pause(&mut self, now: Instant) -> Option<bool> {
        if !self.running {
            return None;
        }
        if self.paused {
            self.start_time = Some(now - self.pause_offset);
            self.paused = false;
        } else {
            self.pause_offset = self.elapsed;
            self.paused = true;
        }
        Some(self.paused)
    }

    /// Refresh `elapsed` from the clock; no-op while idle or paused
    pub fn tick(&mut self, now: Instant) {
        if !self.running || self.paused {
            return;
        }
        if let Some(start) = self.start_time {
            self.elapsed = now.saturating_duration_since(start);
        }
    }

    /// Append a split with the trimmed name; whitespace-only names are
    /// rejected silently. Returns the new split's id when one was added.
    pub fn add_split(&mut self, name: &str) -> Option<SplitId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let split = Split::new(trimmed);
        let id = split.id;
        self.splits.push(split);
        Some(id)
    }

    /// Remove the split with the given id; returns whether one was removed.
    ///
    /// Removal only changes membership. The current index is clamped so it
    /// never exceeds the new length.
    pub fn remove_split(&mut self, id: SplitId) -> bool {
        let before = self.splits.len();
        self.splits.retain(|s| s.id != id);
        if self.current_split_index > self.splits.len() {
            self.current_split_index = self.splits.len();
        }
        self.splits.len() != before
    }

    /// Rename the split with the given id; returns whether one was renamed
    pub fn rename_split(&mut self, id: SplitId, name: &str) -> bool {
        match self.splits.iter_mut().find(|s| s.id == id) {
            Some(split) => {
                split.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Live time within the current split: elapsed minus the most recent
    /// recorded split time before the current index. `None` unless a run is
    /// in progress with splits remaining.
    pub fn current_split_time(&self) -> Option<Duration> {
        if !self.running || self.current_split_index >= self.splits.len() {
            return None;
        }
        let previous = self.splits[..self.current_split_index]
            .iter()
            .filter_map(|s| s.time)
            .last()
            .unwrap_or(Duration::ZERO);
        Some(self.elapsed.saturating_sub(previous))
    }

    /// Whether the last run passed every split and has not been restarted
    pub fn is_finished(&self) -> bool {
        !self.running && !self.splits.is_empty() && self.current_split_index == self.splits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str]) -> TimerState {
        let mut state = TimerState::new();
        for name in names {
            state.add_split(name);
        }
        state
    }

    #[test]
    fn test_start_clears_times_and_index() {
        let mut state = state_with(&["A", "B"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_millis(50));
        state.split();

        state.start(t0 + Duration::from_millis(100));
        assert!(state.running);
        assert!(!state.paused);
        assert_eq!(state.current_split_index, 0);
        assert!(state.splits.iter().all(|s| s.time.is_none()));
    }

    #[test]
    fn test_full_run_records_nondecreasing_times() {
        let mut state = state_with(&["A", "B", "C"]);
        let t0 = Instant::now();
        state.start(t0);

        for i in 1..=3 {
            state.tick(t0 + Duration::from_millis(100 * i));
            state.split();
        }

        assert!(!state.running);
        assert_eq!(state.current_split_index, 3);
        let times: Vec<Duration> = state.splits.iter().map(|s| s.time.unwrap()).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert!(state.is_finished());
    }

    #[test]
    fn test_two_split_scenario() {
        let mut state = state_with(&["A", "B"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_millis(10));

        assert_eq!(state.split(), SplitOutcome::Recorded(0));
        assert!(state.splits[0].time.is_some());
        assert_eq!(state.current_split_index, 1);
        assert!(state.running);

        assert_eq!(state.split(), SplitOutcome::Finished(1));
        assert!(state.splits[1].time.is_some());
        assert_eq!(state.current_split_index, 2);
        assert!(!state.running);
    }

    #[test]
    fn test_split_after_finish_is_noop() {
        let mut state = state_with(&["A"]);
        state.start(Instant::now());
        state.split();
        let snapshot = state.clone();

        assert_eq!(state.split(), SplitOutcome::Ignored);
        assert_eq!(state.current_split_index, snapshot.current_split_index);
        assert_eq!(state.running, snapshot.running);
        assert_eq!(state.splits, snapshot.splits);
    }

    #[test]
    fn test_split_while_idle_is_noop() {
        let mut state = state_with(&["A"]);
        assert_eq!(state.split(), SplitOutcome::Ignored);
        assert!(state.splits[0].time.is_none());
    }

    #[test]
    fn test_split_with_no_splits_is_noop() {
        let mut state = TimerState::new();
        state.start(Instant::now());
        assert_eq!(state.split(), SplitOutcome::Ignored);
        assert_eq!(state.current_split_index, 0);
    }

    #[test]
    fn test_final_elapsed_retained_after_finish() {
        let mut state = state_with(&["A"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_secs(3));
        state.split();
        assert_eq!(state.elapsed, Duration::from_secs(3));
    }

    #[test]
    fn test_reset_yields_canonical_idle() {
        let mut state = state_with(&["A", "B"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_millis(500));
        state.split();
        state.toggle_pause(t0 + Duration::from_millis(600));

        state.reset();
        assert!(!state.running);
        assert!(!state.paused);
        assert!(state.start_time.is_none());
        assert_eq!(state.elapsed, Duration::ZERO);
        assert_eq!(state.current_split_index, 0);
        assert!(state.splits.iter().all(|s| s.time.is_none()));
    }

    #[test]
    fn test_pause_implies_running() {
        let mut state = state_with(&["A"]);
        assert_eq!(state.toggle_pause(Instant::now()), None);
        assert!(!state.paused);

        state.start(Instant::now());
        assert_eq!(state.toggle_pause(Instant::now()), Some(true));
        assert!(state.running);
    }

    #[test]
    fn test_pause_freezes_elapsed_and_resume_rebases() {
        let mut state = state_with(&["A"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_secs(2));

        state.toggle_pause(t0 + Duration::from_secs(2));
        // Ticks during the pause must not move elapsed
        state.tick(t0 + Duration::from_secs(10));
        assert_eq!(state.elapsed, Duration::from_secs(2));

        // Resume five seconds later; elapsed continues from 2s
        state.toggle_pause(t0 + Duration::from_secs(7));
        state.tick(t0 + Duration::from_secs(8));
        assert_eq!(state.elapsed, Duration::from_secs(3));
    }

    #[test]
    fn test_double_toggle_pause_no_drift() {
        let mut state = state_with(&["A"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_secs(1));
        let before = state.elapsed;

        let t1 = t0 + Duration::from_secs(1);
        state.toggle_pause(t1);
        state.toggle_pause(t1);
        state.tick(t1);
        assert_eq!(state.elapsed, before);
    }

    #[test]
    fn test_paused_interval_excluded_from_recorded_times() {
        let mut state = state_with(&["A"]);
        let t0 = Instant::now();
        state.start(t0);
        state.tick(t0 + Duration::from_secs(1));
        state.toggle_pause(t0 + Duration::from_secs(1));
        state.toggle_pause(t0 + Duration::from_secs(60));
        state.tick(t0 + Duration::from_secs(61));
        state.split();
        assert_eq!(state.splits[0].time, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_add_split_trims_and_rejects_whitespace() {
        let mut state = TimerState::new();
        assert!(state.add_split("  ").is_none());
        assert!(state.splits.is_empty());

        assert!(state.add_split(" C ").is_some());
        assert_eq!(state.splits.len(), 1);
        assert_eq!(state.splits[0].name, "C");
    }

    #[test]
    fn test_remove_and_rename_split() {
        let mut state = TimerState::new();
        let a = state.add_split("A").unwrap();
        let b = state.add_split("B").unwrap();

        assert!(state.rename_split(a, "Alpha"));
        assert_eq!(state.splits[0].name, "Alpha");

        assert!(state.remove_split(b));
        assert_eq!(state.splits.len(), 1);
        assert!(!state.remove_split(b));
    }

    #[test]
    fn test_remove_split_clamps_index() {
        let mut state = state_with(&["A"]);
        state.start(Instant::now());
        state.split();
        assert_eq!(state.current_split_index, 1);

        let id = state.splits[0].id;
        state.remove_split(id);
        assert_eq!(state.current_split_index, 0);
    }

    #[test]
    fn test_current_split_time() {
        let mut state = state_with(&["A", "B"]);
        let t0 = Instant::now();
        assert_eq!(state.current_split_time(), None);

        state.start(t0);
        state.tick(t0 + Duration::from_secs(5));
        assert_eq!(state.current_split_time(), Some(Duration::from_secs(5)));

        state.split();
        state.tick(t0 + Duration::from_secs(8));
        assert_eq!(state.current_split_time(), Some(Duration::from_secs(3)));

        state.split();
        assert_eq!(state.current_split_time(), None);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut state = state_with(&["A", "B"]);
        let t0 = Instant::now();
        state.start(t0);
        for _ in 0..5 {
            state.split();
            assert!(state.current_split_index <= state.splits.len());
        }
        state.reset();
        assert_eq!(state.current_split_index, 0);
    }

    #[test]
    fn test_display_mode_tags() {
        assert_eq!(DisplayMode::Both.as_str(), "both");
        assert_eq!(DisplayMode::from_str("total"), Some(DisplayMode::Total));
        assert_eq!(DisplayMode::from_str("bogus"), None);
    }
}
