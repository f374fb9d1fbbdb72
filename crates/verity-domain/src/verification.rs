//! Verification outcomes and severity tiers

use crate::Claim;
use serde::{Deserialize, Serialize};

/// Criticality tier of a verification outcome
///
/// Severity is a pure function of `(is_supported, confidence)`:
/// - `Error` iff the claim is unsupported
/// - `Warning` iff supported but confidence is below 0.5
/// - `Info` otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Supported with adequate confidence; no action needed
    Info,
    /// Supported but thinly sourced
    Warning,
    /// Unsupported; always repaired
    Error,
}

impl Severity {
    /// Derive the severity tier for a verification outcome
    ///
    /// This is the single derivation point; constructing a
    /// [`VerificationResult`] goes through it.
    pub fn for_outcome(is_supported: bool, confidence: f64) -> Self {
        if !is_supported {
            Severity::Error
        } else if confidence < 0.5 {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    /// String form used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Outcome of verifying one claim against a set of evidence sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The claim this result describes
    pub claim: Claim,

    /// Whether any source supports the claim
    pub is_supported: bool,

    /// Support confidence, clamped to [0.0, 1.0]
    pub confidence: f64,

    /// Identifiers (URL or title) of the supporting sources
    pub supporting_sources: Vec<String>,

    /// Human-readable repair text, when a repair applies
    pub suggested_fix: Option<String>,

    /// Criticality tier, derived from `(is_supported, confidence)`
    pub severity: Severity,
}

impl VerificationResult {
    /// Build a result, clamping confidence and deriving severity
    pub fn new(
        claim: Claim,
        is_supported: bool,
        confidence: f64,
        supporting_sources: Vec<String>,
        suggested_fix: Option<String>,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        Self {
            claim,
            is_supported,
            confidence,
            supporting_sources,
            suggested_fix,
            severity: Severity::for_outcome(is_supported, confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim() -> Claim {
        Claim::new("The study found a 12% improvement.", "ctx")
    }

    #[test]
    fn test_unsupported_is_error() {
        let result = VerificationResult::new(claim(), false, 0.0, vec![], None);
        assert_eq!(result.severity, Severity::Error);
    }

    #[test]
    fn test_low_confidence_is_warning() {
        let result = VerificationResult::new(
            claim(),
            true,
            0.3,
            vec!["https://example.org".to_string()],
            None,
        );
        assert_eq!(result.severity, Severity::Warning);
    }

    #[test]
    fn test_supported_is_info() {
        let result = VerificationResult::new(
            claim(),
            true,
            0.9,
            vec!["https://example.org".to_string()],
            None,
        );
        assert_eq!(result.severity, Severity::Info);
    }

    #[test]
    fn test_confidence_clamped() {
        let result = VerificationResult::new(claim(), true, 1.7, vec![], None);
        assert_eq!(result.confidence, 1.0);

        let result = VerificationResult::new(claim(), true, -0.2, vec![], None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Info.as_str(), "info");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Error.as_str(), "error");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: severity is a deterministic function of
        /// (is_supported, confidence) over the whole input space
        #[test]
        fn test_severity_invariant(is_supported: bool, confidence in -1.0f64..2.0) {
            let result = VerificationResult::new(
                Claim::new("t", "c"),
                is_supported,
                confidence,
                vec![],
                None,
            );

            if !is_supported {
                prop_assert_eq!(result.severity, Severity::Error);
            } else if result.confidence < 0.5 {
                prop_assert_eq!(result.severity, Severity::Warning);
            } else {
                prop_assert_eq!(result.severity, Severity::Info);
            }
        }

        /// Property: stored confidence is always within [0.0, 1.0]
        #[test]
        fn test_confidence_bounds(confidence in -10.0f64..10.0) {
            let result = VerificationResult::new(
                Claim::new("t", "c"),
                true,
                confidence,
                vec![],
                None,
            );
            prop_assert!((0.0..=1.0).contains(&result.confidence));
        }

        /// Property: error severity holds exactly when unsupported
        #[test]
        fn test_error_iff_unsupported(is_supported: bool, confidence in 0.0f64..1.0) {
            let result = VerificationResult::new(
                Claim::new("t", "c"),
                is_supported,
                confidence,
                vec![],
                None,
            );
            prop_assert_eq!(result.severity == Severity::Error, !is_supported);
        }
    }
}
