//! Verity Fact Checker
//!
//! Turns free research text into verifiable claims and judges each claim
//! against a set of evidence sources.
//!
//! # Architecture
//!
//! - `segment`: paragraph/sentence splitting shared with the fixer
//! - `extract`: factual-indicator matching that promotes sentences to claims
//! - `scorer`: the token-overlap support heuristic behind the `MatchScorer`
//!   seam
//! - `checker`: the memoizing `FactChecker` itself
//!
//! # Examples
//!
//! ```
//! use verity_checker::{CheckerConfig, FactChecker};
//!
//! let mut checker = FactChecker::new(CheckerConfig::default());
//! let results = checker.verify_research("Revenue grew by 45% in 2022.", &[]);
//! assert_eq!(results.len(), 1);
//! assert!(!results[0].is_supported);
//! ```

#![warn(missing_docs)]

pub mod checker;
pub mod config;
pub mod extract;
pub mod scorer;
pub mod segment;

pub use checker::FactChecker;
pub use config::CheckerConfig;
pub use extract::extract_claims;
pub use scorer::TokenOverlapScorer;
