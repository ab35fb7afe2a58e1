//! Error types for the persistence layer
//!
//! Timer operations never fail; invalid calls are guarded no-ops. Errors
//! only arise when reading or writing the backing store, and the timer
//! treats those as best-effort (logged, not propagated).

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error reading or writing persisted timer state
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem failure
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted payload could not be encoded or decoded
    #[error("store encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}
