//! Verity Research Memory
//!
//! A durable, domain-partitioned store of learned research patterns and
//! source/terminology statistics. State is loaded once at construction
//! from a JSON file and flushed back on every mutating call, so learning
//! survives across sessions.
//!
//! # Architecture
//!
//! - `memory`: the `ResearchMemory` store and its JSON file format
//! - `analysis`: pure derivation of structure and source-quality patterns
//!   from a finished research run
//! - `retention`: injectable growth policies (`Unbounded` by default,
//!   `KeepTopN` for capped stores)
//!
//! # Examples
//!
//! ```no_run
//! use verity_memory::ResearchMemory;
//!
//! let memory = ResearchMemory::load("research_memory");
//! let context = memory.get_patterns("medicine");
//! assert!(context.is_empty());
//! ```

#![warn(missing_docs)]

pub mod analysis;
pub mod memory;
pub mod retention;

mod error;

pub use error::MemoryError;
pub use memory::{RelevantContext, ResearchMemory};
pub use retention::{KeepTopN, RetentionPolicy, Unbounded};
