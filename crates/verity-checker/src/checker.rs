//! Core FactChecker implementation

use crate::config::CheckerConfig;
use crate::extract::extract_claims;
use crate::scorer::TokenOverlapScorer;
use std::collections::HashMap;
use tracing::{debug, info};
use verity_domain::traits::{MatchScorer, NoRetriever, SourceRetriever};
use verity_domain::{Claim, SourceRecord, VerificationResult};

/// The FactChecker extracts claims from text and verifies each against
/// supplied evidence sources
///
/// Verification is memoized per distinct claim text: for the lifetime of a
/// checker instance, the underlying match computation runs at most once for
/// a given sentence.
///
/// # Examples
///
/// ```
/// use verity_checker::{CheckerConfig, FactChecker};
/// use verity_domain::SourceRecord;
///
/// let mut checker = FactChecker::new(CheckerConfig::default());
/// let sources = vec![SourceRecord::new(
///     "https://example.edu/report",
///     "Annual Report",
///     "Company revenue grew by 45% during fiscal year 2022",
///     "",
/// )];
///
/// let results = checker.verify_research("Revenue grew by 45% in 2022.", &sources);
/// assert!(results[0].is_supported);
/// ```
pub struct FactChecker<R: SourceRetriever = NoRetriever> {
    scorer: Box<dyn MatchScorer + Send + Sync>,
    retriever: Option<R>,
    config: CheckerConfig,
    cache: HashMap<String, VerificationResult>,
}

impl FactChecker<NoRetriever> {
    /// Create a checker with the built-in token-overlap scorer and no
    /// supplemental retrieval
    pub fn new(config: CheckerConfig) -> Self {
        Self {
            scorer: Box::new(TokenOverlapScorer::new(config.min_token_len)),
            retriever: None,
            config,
            cache: HashMap::new(),
        }
    }
}

impl<R> FactChecker<R>
where
    R: SourceRetriever,
    R::Error: std::fmt::Display,
{
    /// Replace the support scorer
    pub fn with_scorer(mut self, scorer: Box<dyn MatchScorer + Send + Sync>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Attach a retriever for supplemental evidence searches on
    /// unsupported claims
    pub fn with_retriever<R2>(self, retriever: R2) -> FactChecker<R2>
    where
        R2: SourceRetriever,
        R2::Error: std::fmt::Display,
    {
        FactChecker {
            scorer: self.scorer,
            retriever: Some(retriever),
            config: self.config,
            cache: self.cache,
        }
    }

    /// Extract verifiable claims from text
    pub fn extract_claims(&self, text: &str) -> Vec<Claim> {
        extract_claims(text)
    }

    /// Number of distinct claim texts verified so far
    pub fn cached_claims(&self) -> usize {
        self.cache.len()
    }

    /// Verify every claim in `text` against `sources`
    ///
    /// Results follow input claim order. Cached results are returned
    /// without recomputation.
    pub fn verify_research(
        &mut self,
        text: &str,
        sources: &[SourceRecord],
    ) -> Vec<VerificationResult> {
        let claims = extract_claims(text);
        info!("Verifying {} claims against {} sources", claims.len(), sources.len());

        let mut results = Vec::with_capacity(claims.len());
        for claim in claims {
            if let Some(cached) = self.cache.get(&claim.text) {
                debug!("Cache hit for claim: {}", claim.text);
                results.push(cached.clone());
                continue;
            }

            let result = self.verify_claim(&claim, sources);
            self.cache.insert(claim.text.clone(), result.clone());
            results.push(result);
        }

        results
    }

    /// Verify a single claim against the supplied sources
    fn verify_claim(&self, claim: &Claim, sources: &[SourceRecord]) -> VerificationResult {
        let mut supporting: Vec<String> = sources
            .iter()
            .filter(|s| self.scorer.score(&claim.text, &s.match_text()) > self.config.overlap_threshold)
            .map(|s| s.identifier().to_string())
            .collect();

        // One bounded supplemental search when nothing in the supplied set
        // matched and a retriever is configured. Matching snippets travel
        // with the result as evidence.
        let mut evidence: Vec<String> = Vec::new();
        if supporting.is_empty() {
            if let Some(retriever) = &self.retriever {
                match retriever.search(&self.supplemental_query(&claim.text)) {
                    Ok(records) => {
                        for record in records.iter().take(self.config.supplemental_results_limit) {
                            if self.scorer.score(&claim.text, &record.match_text())
                                > self.config.overlap_threshold
                            {
                                supporting.push(record.identifier().to_string());
                                evidence.push(if record.snippet.is_empty() {
                                    record.content.clone()
                                } else {
                                    record.snippet.clone()
                                });
                            }
                        }
                    }
                    Err(e) => {
                        debug!("Supplemental search failed, treating as no evidence: {}", e);
                    }
                }
            }
        }

        let is_supported = !supporting.is_empty();
        let confidence =
            (supporting.len() as f64 * self.config.per_source_confidence).min(1.0);
        let suggested_fix = self.suggested_fix(claim, is_supported, confidence);

        let mut claim = claim.clone();
        claim.evidence = evidence;
        VerificationResult::new(claim, is_supported, confidence, supporting, suggested_fix)
    }

    /// Deterministic repair text for a verification outcome
    fn suggested_fix(&self, claim: &Claim, is_supported: bool, confidence: f64) -> Option<String> {
        if !is_supported {
            return Some(match &claim.source_cited {
                Some(cited) => format!(
                    "The cited source '{}' cannot be verified against the available sources. \
                     Verify the citation or remove it.",
                    cited
                ),
                None => {
                    let excerpt: String =
                        claim.text.chars().take(self.config.fix_excerpt_chars).collect();
                    format!("Add citation for claim: '{}...'", excerpt)
                }
            });
        }

        if confidence < self.config.low_confidence_threshold {
            return Some("Consider adding more sources to strengthen this claim.".to_string());
        }

        None
    }

    /// Query built from the claim's leading significant tokens
    fn supplemental_query(&self, claim_text: &str) -> String {
        claim_text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() > self.config.min_token_len)
            .take(self.config.supplemental_query_tokens)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_domain::Severity;

    fn supporting_source() -> SourceRecord {
        SourceRecord::new(
            "https://example.edu/annual-report",
            "Annual Report 2022",
            "Company revenue grew by 45% during fiscal year 2022 according to filings",
            "revenue grew 45% in 2022",
        )
    }

    #[test]
    fn test_unsupported_claim_is_error_with_citation_fix() {
        let mut checker = FactChecker::new(CheckerConfig::default());
        let results = checker.verify_research("Revenue grew by 45% in 2022.", &[]);

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!(!result.is_supported);
        assert_eq!(result.severity, Severity::Error);
        assert!(result.suggested_fix.as_ref().unwrap().contains("Add citation for claim"));
    }

    #[test]
    fn test_supported_claim() {
        let mut checker = FactChecker::new(CheckerConfig::default());
        let results =
            checker.verify_research("Revenue grew by 45% in 2022.", &[supporting_source()]);

        let result = &results[0];
        assert!(result.is_supported);
        assert_eq!(result.supporting_sources, vec!["https://example.edu/annual-report"]);
        assert!((result.confidence - 0.3).abs() < 1e-9);
        // One source keeps confidence below 0.5, so it stays a warning
        assert_eq!(result.severity, Severity::Warning);
        assert!(result
            .suggested_fix
            .as_ref()
            .unwrap()
            .contains("adding more sources"));
    }

    #[test]
    fn test_cited_but_unverifiable_claim_fix() {
        let mut checker = FactChecker::new(CheckerConfig::default());
        let results = checker.verify_research("Revenue grew by 45% in 2022 [Smith 2020].", &[]);

        let fix = results[0].suggested_fix.as_ref().unwrap();
        assert!(fix.contains("Smith 2020"));
        assert!(fix.contains("cannot be verified"));
    }

    #[test]
    fn test_confidence_caps_at_one() {
        let mut checker = FactChecker::new(CheckerConfig::default());
        let sources: Vec<SourceRecord> = (0..6)
            .map(|i| {
                SourceRecord::new(
                    format!("https://example.edu/report-{}", i),
                    "Report",
                    "Company revenue grew by 45% during fiscal year 2022",
                    "",
                )
            })
            .collect();

        let results = checker.verify_research("Revenue grew by 45% in 2022.", &sources);
        assert_eq!(results[0].confidence, 1.0);
        assert_eq!(results[0].supporting_sources.len(), 6);
    }

    #[test]
    fn test_memoization_returns_cached_result() {
        let mut checker = FactChecker::new(CheckerConfig::default());
        let text = "Revenue grew by 45% in 2022.";

        let first = checker.verify_research(text, &[supporting_source()]);
        // Second pass with no sources must hit the cache and keep the
        // original outcome
        let second = checker.verify_research(text, &[]);

        assert_eq!(first, second);
        assert_eq!(checker.cached_claims(), 1);
    }

    #[test]
    fn test_empty_input_never_errors() {
        let mut checker = FactChecker::new(CheckerConfig::default());
        assert!(checker.verify_research("", &[]).is_empty());
        assert!(checker.verify_research("\n\n\n", &[]).is_empty());
        assert!(checker.verify_research("no factual content here", &[]).is_empty());
    }

    #[test]
    fn test_supplemental_query_is_bounded() {
        let checker = FactChecker::new(CheckerConfig::default());
        let query = checker.supplemental_query(
            "renewable energy capacity expanded rapidly across several european countries during recent years",
        );
        assert!(query.split(' ').count() <= 8);
    }
}
