//! Key-value persistence for splits and settings
//!
//! Two independent entries keyed by fixed, versioned strings: the splits
//! list as a JSON array of records, and the display mode as its bare tag
//! string. Writes are write-through from the timer on every mutation;
//! reads happen once at construction, falling back to defaults on any
//! absence or decode failure.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{DisplayMode, Split, SplitId};
use crate::error::Result;

/// Persisted key for the splits list
pub const SPLITS_KEY: &str = "speedrun.splits.v6";
/// Persisted key for the display-mode setting
pub const SETTINGS_KEY: &str = "speedrun.settings.v6";

/// Key-value backing store for persisted timer state
pub trait Store: Send + Sync {
    /// Read the value for a key, if present
    fn get(&self, key: &str) -> Option<String>;
    /// Write the value for a key
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Persisted form of a [`Split`]: time stored as fractional seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Stable split identifier
    pub id: SplitId,
    /// Display name
    pub name: String,
    /// Recorded time in seconds, absent if the run has not passed it
    pub time: Option<f64>,
}

impl From<&Split> for SplitRecord {
    fn from(split: &Split) -> Self {
        Self {
            id: split.id,
            name: split.name.clone(),
            time: split.time.map(|t| t.as_secs_f64()),
        }
    }
}

impl From<SplitRecord> for Split {
    fn from(record: SplitRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            time: record.time.map(Duration::from_secs_f64),
        }
    }
}

/// Encode a splits list for the store
pub fn encode_splits(splits: &[Split]) -> Result<String> {
    let records: Vec<SplitRecord> = splits.iter().map(SplitRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decode a splits list from the store
pub fn decode_splits(payload: &str) -> Result<Vec<Split>> {
    let records: Vec<SplitRecord> = serde_json::from_str(payload)?;
    Ok(records.into_iter().map(Split::from).collect())
}

/// The built-in placeholder splits used when nothing has been persisted
pub fn default_splits() -> Vec<Split> {
    ["Level 1", "Level 2", "Boss", "Finale"]
        .into_iter()
        .map(Split::new)
        .collect()
}

/// File-backed store: one file per key under a data directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // Write to a sibling temp file then rename, so a crash mid-write
        // never leaves a truncated payload behind.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral use
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load persisted splits, substituting the built-in defaults on absence,
/// decode failure, or an empty list
pub fn load_splits(store: &dyn Store) -> Vec<Split> {
    let loaded = store
        .get(SPLITS_KEY)
        .and_then(|payload| match decode_splits(&payload) {
            Ok(splits) => Some(splits),
            Err(e) => {
                log::warn!("Failed to decode persisted splits, using defaults: {}", e);
                None
            }
        })
        .unwrap_or_default();

    if loaded.is_empty() {
        default_splits()
    } else {
        loaded
    }
}

/// Load the persisted display mode, defaulting to `Both`
pub fn load_display_mode(store: &dyn Store) -> DisplayMode {
    store
        .get(SETTINGS_KEY)
        .and_then(|tag| DisplayMode::from_str(tag.trim()))
        .unwrap_or_default()
}
