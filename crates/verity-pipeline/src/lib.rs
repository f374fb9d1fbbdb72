//! Verity Research Pipeline
//!
//! Orchestrates one research request end to end: fetch learned context,
//! call the generator exactly once, retrieve evidence sources, verify
//! every claim, repair the text only when verification found errors, then
//! record the outcome so future requests start better informed.
//!
//! The generator call and each per-term retrieval run under explicit
//! timeouts; a failing or timed-out search term is skipped, a failing or
//! timed-out generator call is fatal.

#![warn(missing_docs)]

pub mod config;
pub mod metrics;
pub mod pipeline;
pub mod prompt;

mod error;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use metrics::RunMetrics;
pub use pipeline::{ResearchOutput, ResearchPipeline};
pub use prompt::ResearchPrompt;
