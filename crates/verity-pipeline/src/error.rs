//! Pipeline error types

use thiserror::Error;
use verity_memory::MemoryError;

/// Errors that can abort a pipeline run
///
/// Per-term retrieval failures are deliberately not represented here; they
/// are logged and skipped inside the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The generator returned an error for the single generation call
    #[error("Generation failed: {0}")]
    Generator(String),

    /// The generation call exceeded its configured timeout
    #[error("Generation timed out after {0} seconds")]
    GeneratorTimeout(u64),

    /// The learning store could not be updated
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),
}
