//! Split identity and record types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable, opaque identifier for a split.
///
/// Identity survives renames and persistence round-trips; it is the key the
/// editor uses to remove or rename a split without touching run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitId(Uuid);

impl SplitId {
    /// Create a new random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SplitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SplitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named checkpoint in a run.
///
/// `time` holds the cumulative elapsed duration at which the run passed this
/// split. It is absent until the run advances past the split, set exactly
/// once per run, and cleared again on the next start or reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Unique identifier for this split
    pub id: SplitId,
    /// Human-readable checkpoint name
    pub name: String,
    /// Cumulative elapsed time recorded when the run passed this split
    pub time: Option<Duration>,
}

impl Split {
    /// Create a new split with no recorded time
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SplitId::new(),
            name: name.into(),
            time: None,
        }
    }
}
