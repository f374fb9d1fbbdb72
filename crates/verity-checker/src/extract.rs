//! Claim extraction from free text
//!
//! A sentence becomes a claim iff it matches at least one factual
//! indicator: a percentage, a currency amount, a 4-digit year, a finding
//! verb, a comparative verb, or an attribution phrase. Extraction is a
//! deterministic single pass over the text.

use crate::segment::{split_paragraphs, split_sentences};
use regex::Regex;
use std::sync::LazyLock;
use verity_domain::Claim;

static FACTUAL_INDICATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+%",
        r"\$[\d,]+",
        r"\b(19|20)\d{2}\b",
        r"(?i)\b(found|showed|revealed|demonstrated|indicated)\b",
        r"(?i)\b(increased|decreased|reduced|improved)\b",
        r"(?i)\b(according to|based on|as reported)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("factual indicator pattern is valid"))
    .collect()
});

static INLINE_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]|\(([^)]+)\)").expect("citation pattern is valid"));

/// Whether a sentence carries at least one factual indicator
pub fn is_factual(sentence: &str) -> bool {
    FACTUAL_INDICATORS.iter().any(|re| re.is_match(sentence))
}

/// Inline `[...]` or `(...)` citation token, if present
pub fn cited_source(sentence: &str) -> Option<String> {
    INLINE_CITATION.captures(sentence).map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    })
}

/// Extract verifiable claims from free text
///
/// Each claim carries its enclosing paragraph as context and its
/// (paragraph, sentence) slot as location. Malformed or empty input yields
/// an empty list, never an error.
pub fn extract_claims(text: &str) -> Vec<Claim> {
    let mut claims = Vec::new();

    for (para_idx, paragraph) in split_paragraphs(text).iter().enumerate() {
        for (sent_idx, sentence) in split_sentences(paragraph).iter().enumerate() {
            if !is_factual(sentence) {
                continue;
            }

            let mut claim = Claim::new(sentence.clone(), paragraph.to_string())
                .with_location(para_idx, sent_idx);
            if let Some(source) = cited_source(sentence) {
                claim = claim.with_source_cited(source);
            }
            claims.push(claim);
        }
    }

    claims
}
