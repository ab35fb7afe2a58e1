//! Shared split timer runner
//!
//! `SplitTimer` wraps the pure [`TimerState`] machine behind a single mutex,
//! owns the periodic elapsed-time refresh, persists splits and settings
//! write-through, and publishes [`TimerEvent`]s to subscribers. It is the
//! one object presentation collaborators hold: they observe via
//! [`snapshot`](SplitTimer::snapshot) or [`on_event`](SplitTimer::on_event)
//! and mutate only through the operations here.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::events::{EventHandler, TimerCallback, TimerEvent};
use super::split::{Split, SplitId};
use super::state::{DisplayMode, SplitOutcome, TimerState};
use crate::store::{self, Store, SETTINGS_KEY, SPLITS_KEY};

/// Default interval between elapsed-time refreshes
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Handle for the background refresh thread
struct TickTask {
    cancelled: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl TickTask {
    /// Signal the thread to exit on its next wake; never joins, so callers
    /// are not blocked for up to one tick interval.
    fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        drop(self.handle);
    }
}

/// Thread-safe split timer with persistence and change notification
pub struct SplitTimer {
    /// Current state, guarded by a single mutex (single-writer model)
    state: Arc<Mutex<TimerState>>,
    /// Backing store for write-through persistence
    store: Arc<dyn Store>,
    /// Event handler for change notifications
    events: Arc<Mutex<EventHandler>>,
    /// The active refresh task, if any; at most one at a time
    tick: Mutex<Option<TickTask>>,
    /// Interval between refreshes
    tick_interval: Duration,
}

impl SplitTimer {
    /// Create a timer backed by `store`, loading persisted splits and the
    /// display mode (defaults substituted on absence or decode failure).
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_tick_interval(store, DEFAULT_TICK_INTERVAL)
    }

    /// Create a timer with a custom refresh interval
    pub fn with_tick_interval(store: Arc<dyn Store>, tick_interval: Duration) -> Self {
        let mut state = TimerState::new();
        state.splits = store::load_splits(store.as_ref());
        state.display_mode = store::load_display_mode(store.as_ref());
        log::info!(
            "Split timer initialized with {} splits, display mode '{}'",
            state.splits.len(),
            state.display_mode.as_str()
        );

        Self {
            state: Arc::new(Mutex::new(state)),
            store,
            events: Arc::new(Mutex::new(EventHandler::new())),
            tick: Mutex::new(None),
            tick_interval,
        }
    }

    /// Clone of the current state for observers
    pub fn snapshot(&self) -> TimerState {
        self.state.lock().clone()
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Register a callback for timer events.
    ///
    /// Callbacks run on the mutating thread (or the tick thread for `Tick`)
    /// and must not call back into the timer.
    pub fn on_event(&self, callback: TimerCallback) {
        self.events.lock().subscribe(callback);
    }

    fn emit(&self, event: &TimerEvent) {
        self.events.lock().emit(event);
    }

    /// Begin a new run, discarding any run in progress
    pub fn start(&self) {
        self.cancel_tick();
        let splits = {
            let mut state = self.state.lock();
            state.start(Instant::now());
            state.splits.clone()
        };
        self.save_splits(&splits);
        self.spawn_tick();
        log::info!("Run started with {} splits", splits.len());
        self.emit(&TimerEvent::Started);
    }

    /// Record the current split and advance; no-op when not running or when
    /// every split has already been recorded.
    pub fn split(&self) {
        let mut state = self.state.lock();
        // Refresh from the clock so the recorded time is not quantized to
        // the tick interval. Frozen elapsed stands while paused.
        state.tick(Instant::now());
        let outcome = state.split();
        let (index, name, time) = match outcome {
            SplitOutcome::Ignored => return,
            SplitOutcome::Recorded(i) | SplitOutcome::Finished(i) => {
                (i, state.splits[i].name.clone(), state.elapsed)
            }
        };
        let splits = state.splits.clone();
        drop(state);

        if let SplitOutcome::Finished(_) = outcome {
            self.cancel_tick();
            self.save_splits(&splits);
            log::info!("Run finished at {:?}", time);
            self.emit(&TimerEvent::SplitRecorded { index, name, time });
            self.emit(&TimerEvent::Finished { total: time });
        } else {
            self.save_splits(&splits);
            log::debug!("Split {} ('{}') recorded at {:?}", index, name, time);
            self.emit(&TimerEvent::SplitRecorded { index, name, time });
        }
    }

    /// The single "advance" action: start when idle, split when running
    pub fn split_or_start(&self) {
        if self.is_running() {
            self.split();
        } else {
            self.start();
        }
    }

    /// Return to the canonical idle state
    pub fn reset(&self) {
        self.cancel_tick();
        let splits = {
            let mut state = self.state.lock();
            state.reset();
            state.splits.clone()
        };
        self.save_splits(&splits);
        log::info!("Run reset");
        self.emit(&TimerEvent::Reset);
    }

    /// Pause or resume the run; no-op when not running
    pub fn toggle_pause(&self) {
        let paused = { self.state.lock().toggle_pause(Instant::now()) };
        match paused {
            Some(true) => {
                self.cancel_tick();
                log::info!("Run paused");
                self.emit(&TimerEvent::Paused);
            }
            Some(false) => {
                self.spawn_tick();
                log::info!("Run resumed");
                self.emit(&TimerEvent::Resumed);
            }
            None => {}
        }
    }

    /// Append a split; whitespace-only names are rejected silently.
    /// Returns the new split's id when one was added.
    pub fn add_split(&self, name: &str) -> Option<SplitId> {
        let (id, splits) = {
            let mut state = self.state.lock();
            let id = state.add_split(name)?;
            (id, state.splits.clone())
        };
        self.save_splits(&splits);
        self.emit(&TimerEvent::SplitsEdited);
        Some(id)
    }

    /// Remove a split by id; returns whether one was removed
    pub fn remove_split(&self, id: SplitId) -> bool {
        let splits = {
            let mut state = self.state.lock();
            if !state.remove_split(id) {
                return false;
            }
            state.splits.clone()
        };
        self.save_splits(&splits);
        self.emit(&TimerEvent::SplitsEdited);
        true
    }

    /// Rename a split by id; returns whether one was renamed
    pub fn rename_split(&self, id: SplitId, name: &str) -> bool {
        let splits = {
            let mut state = self.state.lock();
            if !state.rename_split(id, name) {
                return false;
            }
            state.splits.clone()
        };
        self.save_splits(&splits);
        self.emit(&TimerEvent::SplitsEdited);
        true
    }

    /// Change the status display preference; persisted immediately
    pub fn set_display_mode(&self, mode: DisplayMode) {
        self.state.lock().display_mode = mode;
        if let Err(e) = self.store.set(SETTINGS_KEY, mode.as_str()) {
            log::warn!("Failed to persist display mode: {}", e);
        }
        self.emit(&TimerEvent::DisplayModeChanged(mode));
    }

    /// Best-effort write-through of the splits list
    fn save_splits(&self, splits: &[Split]) {
        let payload = match store::encode_splits(splits) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Failed to encode splits for persistence: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(SPLITS_KEY, &payload) {
            log::warn!("Failed to persist splits: {}", e);
        }
    }

    /// Replace any outstanding refresh task with a fresh one
    fn spawn_tick(&self) {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let state = self.state.clone();
        let events = self.events.clone();
        let interval = self.tick_interval;

        let handle = thread::spawn(move || loop {
            thread::sleep(interval);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            let elapsed = {
                let mut state = state.lock();
                if !state.running || state.paused {
                    break;
                }
                state.tick(Instant::now());
                state.elapsed
            };
            events.lock().emit(&TimerEvent::Tick { elapsed });
        });

        let previous = self.tick.lock().replace(TickTask { cancelled, handle });
        if let Some(task) = previous {
            task.cancel();
        }
    }

    /// Cancel the outstanding refresh task, if any
    fn cancel_tick(&self) {
        if let Some(task) = self.tick.lock().take() {
            task.cancel();
        }
    }
}

impl Drop for SplitTimer {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}
