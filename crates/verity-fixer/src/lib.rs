//! Verity Targeted Fixer
//!
//! Applies minimal, localized textual edits to address only the claims
//! flagged by verification. Every edit is local to the sentence slot that
//! owns the failing claim; the surrounding text is never regenerated.
//!
//! # Examples
//!
//! ```
//! use verity_fixer::{FixerConfig, TargetedFixer};
//!
//! let fixer = TargetedFixer::new(FixerConfig::default());
//! // With no results there is nothing to repair
//! assert_eq!(fixer.fix_issues("Untouched text.", &[]), "Untouched text.");
//! ```

#![warn(missing_docs)]

mod config;
mod fixer;

pub use config::FixerConfig;
pub use fixer::TargetedFixer;
