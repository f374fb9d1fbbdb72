//! Claim module - the unit of verifiable text in Verity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a claim within its source text
///
/// Paragraphs are blank-line-separated blocks; sentences are indexed within
/// their paragraph. The fixer uses this slot to keep edits local to the
/// owning sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClaimLocation {
    /// Zero-based paragraph index
    pub paragraph: usize,
    /// Zero-based sentence index within the paragraph
    pub sentence: usize,
}

impl ClaimLocation {
    /// Create a new location
    pub fn new(paragraph: usize, sentence: usize) -> Self {
        Self { paragraph, sentence }
    }
}

impl fmt::Display for ClaimLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.paragraph, self.sentence)
    }
}

/// Verification lifecycle of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Not yet checked against any sources
    #[default]
    Unverified,
    /// At least one source supports the claim
    Verified,
    /// Sources conflict about the claim
    Disputed,
    /// No source supports the claim
    Unsupported,
}

impl VerificationStatus {
    /// String form used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Disputed => "disputed",
            VerificationStatus::Unsupported => "unsupported",
        }
    }
}

/// A factual assertion extracted from generated text
///
/// Claims are immutable once extracted; verification never mutates a claim,
/// it produces a separate [`crate::VerificationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// The sentence carrying the assertion
    pub text: String,

    /// The enclosing paragraph, kept for context
    pub context: String,

    /// Inline citation token captured from `[...]` or `(...)` markers
    pub source_cited: Option<String>,

    /// Confidence assigned at extraction time (0.0 until verified)
    pub confidence: f64,

    /// Verification lifecycle status
    pub status: VerificationStatus,

    /// Evidence snippets gathered during verification
    pub evidence: Vec<String>,

    /// (paragraph, sentence) slot within the source text
    pub location: Option<ClaimLocation>,
}

impl Claim {
    /// Create a new unverified claim
    pub fn new(text: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
            source_cited: None,
            confidence: 0.0,
            status: VerificationStatus::Unverified,
            evidence: Vec::new(),
            location: None,
        }
    }

    /// Attach an inline citation token
    pub fn with_source_cited(mut self, source: impl Into<String>) -> Self {
        self.source_cited = Some(source.into());
        self
    }

    /// Attach the (paragraph, sentence) slot
    pub fn with_location(mut self, paragraph: usize, sentence: usize) -> Self {
        self.location = Some(ClaimLocation::new(paragraph, sentence));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claim_defaults() {
        let claim = Claim::new("Revenue grew by 45% in 2022.", "Revenue grew by 45% in 2022.");
        assert_eq!(claim.confidence, 0.0);
        assert_eq!(claim.status, VerificationStatus::Unverified);
        assert!(claim.evidence.is_empty());
        assert!(claim.source_cited.is_none());
        assert!(claim.location.is_none());
    }

    #[test]
    fn test_claim_builders() {
        let claim = Claim::new("text", "context")
            .with_source_cited("Smith 2020")
            .with_location(2, 1);

        assert_eq!(claim.source_cited.as_deref(), Some("Smith 2020"));
        assert_eq!(claim.location, Some(ClaimLocation::new(2, 1)));
    }

    #[test]
    fn test_location_ordering() {
        // Locations order by paragraph first, then sentence, so the fixer
        // can apply edits front to back
        let a = ClaimLocation::new(0, 3);
        let b = ClaimLocation::new(1, 0);
        let c = ClaimLocation::new(1, 2);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(VerificationStatus::Unverified.as_str(), "unverified");
        assert_eq!(VerificationStatus::Unsupported.as_str(), "unsupported");
    }
}
