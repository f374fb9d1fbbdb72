//! Verity Domain Layer
//!
//! This crate contains the core data model for Verity's fact-verification
//! loop. It defines the value objects that flow between the checker, the
//! learning memory, and the fixer, plus the trait interfaces that all
//! infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Claim**: a single factual assertion extracted from generated text,
//!   located by its (paragraph, sentence) slot
//! - **VerificationResult**: the outcome of checking a claim against
//!   evidence sources, with a severity tier driving repair
//! - **ResearchPattern**: a learned, domain-scoped record of what
//!   structural/source characteristics correlated with verification success
//! - **SourceRecord**: an evidence source as returned by a retriever
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Value objects and pure derivations only
//! - Trait definitions for all external interactions
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod pattern;
pub mod source;
pub mod traits;
pub mod verification;

// Re-exports for convenience
pub use claim::{Claim, ClaimLocation, VerificationStatus};
pub use pattern::{DomainKnowledge, PatternKind, ResearchPattern};
pub use source::{SourceRecord, SourceType};
pub use verification::{Severity, VerificationResult};
