//! Targeted repair of verification failures

use crate::config::FixerConfig;
use tracing::debug;
use verity_checker::segment::{sentence_spans, split_paragraphs};
use verity_domain::{Severity, VerificationResult};

/// Note appended after thinly-sourced claims during a bulk warning repair
const LIMITED_SOURCES_NOTE: &str =
    " (Note: Limited sources available for some claims in this section)";

/// Applies minimal, localized edits for claims flagged by verification
///
/// Error-severity results are always repaired, warning-severity results
/// only when more than the configured threshold exist, and info-severity
/// results are never touched.
pub struct TargetedFixer {
    config: FixerConfig,
}

impl TargetedFixer {
    /// Create a fixer with the given configuration
    pub fn new(config: FixerConfig) -> Self {
        Self { config }
    }

    /// Create a fixer with default configuration
    pub fn default_config() -> Self {
        Self::new(FixerConfig::default())
    }

    /// Apply a single result's suggested fix to `original`
    ///
    /// Pure function: if the claim text occurs verbatim, its first
    /// occurrence is replaced by the suggested fix; otherwise the fix is
    /// appended. Without a suggested fix the input is returned unchanged.
    pub fn apply_fix(&self, original: &str, result: &VerificationResult) -> String {
        let Some(fix) = &result.suggested_fix else {
            return original.to_string();
        };

        if original.contains(result.claim.text.as_str()) {
            original.replacen(result.claim.text.as_str(), fix, 1)
        } else {
            format!("{}\n\n{}", original, fix)
        }
    }

    /// Repair a text according to the severity of each result
    pub fn fix_issues(&self, text: &str, results: &[VerificationResult]) -> String {
        let errors: Vec<&VerificationResult> = results
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .collect();
        let warnings: Vec<&VerificationResult> = results
            .iter()
            .filter(|r| r.severity == Severity::Warning)
            .collect();

        debug!(
            "Fixing issues: {} errors, {} warnings (threshold {})",
            errors.len(),
            warnings.len(),
            self.config.warning_fix_threshold
        );

        let mut fixed = text.to_string();
        if !errors.is_empty() {
            fixed = self.fix_errors(&fixed, &errors);
        }
        if warnings.len() > self.config.warning_fix_threshold {
            fixed = self.fix_warnings(&fixed, &warnings);
        }
        fixed
    }

    /// Repair error-severity results at their (paragraph, sentence) slots
    ///
    /// Claims without a location are skipped rather than matched globally.
    /// Each edit splices only the targeted sentence's byte span, so the
    /// spacing and line breaks around sibling sentences survive untouched.
    /// Spans within a paragraph are edited back to front to keep earlier
    /// offsets valid.
    fn fix_errors(&self, text: &str, errors: &[&VerificationResult]) -> String {
        let mut located: Vec<&VerificationResult> = errors
            .iter()
            .filter(|r| r.claim.location.is_some() && r.suggested_fix.is_some())
            .copied()
            .collect();
        located.sort_by_key(|r| r.claim.location);

        let paragraphs: Vec<String> = split_paragraphs(text)
            .into_iter()
            .enumerate()
            .map(|(para_idx, paragraph)| {
                let targets: Vec<&&VerificationResult> = located
                    .iter()
                    .filter(|r| r.claim.location.map(|l| l.paragraph) == Some(para_idx))
                    .collect();
                if targets.is_empty() {
                    return paragraph.to_string();
                }

                let spans = sentence_spans(paragraph);
                let mut edited = paragraph.to_string();
                for result in targets.into_iter().rev() {
                    let (Some(location), Some(fix)) =
                        (result.claim.location, result.suggested_fix.as_deref())
                    else {
                        continue;
                    };
                    let Some(span) = spans.get(location.sentence) else {
                        continue;
                    };

                    if fix.contains("Add citation") {
                        edited.insert_str(span.end, " [citation needed]");
                    } else if fix.contains("cannot be verified") {
                        edited.insert_str(span.end, "]");
                        edited.insert_str(span.start, "[UNVERIFIED: ");
                    }
                }
                edited
            })
            .collect();

        paragraphs.join("\n\n")
    }

    /// Bulk warning repair: append a limited-sources note after each
    /// warned claim found verbatim in the text
    fn fix_warnings(&self, text: &str, warnings: &[&VerificationResult]) -> String {
        let mut fixed = text.to_string();
        for result in warnings {
            let claim = result.claim.text.as_str();
            if let Some(pos) = fixed.find(claim) {
                fixed.insert_str(pos + claim.len(), LIMITED_SOURCES_NOTE);
            }
        }
        fixed
    }
}
