//! Error types for the research memory

use thiserror::Error;

/// Errors that can occur while persisting memory state
///
/// Load failures are not represented here: a missing or corrupt backing
/// file degrades to an empty in-memory store rather than an error.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Filesystem error while writing the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
