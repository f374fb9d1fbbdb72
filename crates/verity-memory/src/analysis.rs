//! Pattern derivation from a finished research run
//!
//! Pure functions that turn generated text and its verification results
//! into the structure and source-quality patterns the memory stores.

use regex::Regex;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use verity_domain::{PatternKind, ResearchPattern, SourceType, VerificationResult};

static INLINE_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]|\([^)]+\)").expect("citation pattern is valid"));

// Two-or-more capitalized words in a row, e.g. "Randomized Controlled Trial"
static CAPITALIZED_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").expect("terminology pattern is valid")
});

/// Blank-line-separated, non-empty sections of a document
pub fn sections(text: &str) -> Vec<&str> {
    text.split("\n\n").filter(|s| !s.trim().is_empty()).collect()
}

/// Fraction of verified claims, 0.0 when there are no claims
pub fn verification_rate(results: &[VerificationResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let verified = results.iter().filter(|r| r.is_supported).count();
    verified as f64 / results.len() as f64
}

/// Derive the structure pattern of a document
///
/// Records section count, average section length in words, whether the
/// document opens with an introduction and closes with a conclusion
/// (keyword scan over the first/last three sections), and citation density
/// (inline citations per section).
pub fn structure_pattern(text: &str, domain: &str, success_metric: f64) -> ResearchPattern {
    let sections = sections(text);
    let section_count = sections.len();

    let total_words: usize = sections.iter().map(|s| s.split_whitespace().count()).sum();
    let avg_section_length = if section_count == 0 {
        0.0
    } else {
        total_words as f64 / section_count as f64
    };

    let has_introduction = sections
        .iter()
        .take(3)
        .any(|s| s.to_lowercase().contains("introduction"));
    let has_conclusion = sections.iter().rev().take(3).any(|s| {
        let lower = s.to_lowercase();
        lower.contains("conclusion") || lower.contains("summary")
    });

    let citation_count = INLINE_CITATION.find_iter(text).count();
    let citation_density = if section_count == 0 {
        0.0
    } else {
        citation_count as f64 / section_count as f64
    };

    ResearchPattern::new(PatternKind::Structure, domain, success_metric)
        .with_value("section_count", json!(section_count))
        .with_value("avg_section_length", json!(avg_section_length))
        .with_value("has_introduction", json!(has_introduction))
        .with_value("has_conclusion", json!(has_conclusion))
        .with_value("citation_density", json!(citation_density))
}

/// Derive the source-quality pattern of a verification run
///
/// Records distinct classified source types among all supporting sources,
/// the most frequent type ("none" when no claim had support), and the
/// average supporting sources per claim.
pub fn source_quality_pattern(
    results: &[VerificationResult],
    domain: &str,
    success_metric: f64,
) -> ResearchPattern {
    let mut type_counts: HashMap<SourceType, usize> = HashMap::new();
    let mut total_sources = 0usize;

    for result in results {
        for source in &result.supporting_sources {
            *type_counts.entry(SourceType::classify(source)).or_insert(0) += 1;
            total_sources += 1;
        }
    }

    let source_diversity = type_counts.len();
    let primary_source_type = type_counts
        .iter()
        .max_by_key(|&(ty, count)| (*count, std::cmp::Reverse(*ty)))
        .map(|(ty, _)| ty.as_str())
        .unwrap_or("none");
    let avg_sources_per_claim = if results.is_empty() {
        0.0
    } else {
        total_sources as f64 / results.len() as f64
    };

    ResearchPattern::new(PatternKind::SourceQuality, domain, success_metric)
        .with_value("source_diversity", json!(source_diversity))
        .with_value("primary_source_type", json!(primary_source_type))
        .with_value("avg_sources_per_claim", json!(avg_sources_per_claim))
}

/// Capitalized-phrase terminology found in a document
///
/// A sentence-initial "The" is part of the capitalized run but not of the
/// term, so it is stripped; phrases that stop being multi-word after the
/// strip are dropped.
pub fn extract_terminology(text: &str) -> BTreeSet<String> {
    CAPITALIZED_PHRASE
        .find_iter(text)
        .filter_map(|m| {
            let term = m.as_str().strip_prefix("The ").unwrap_or(m.as_str());
            term.contains(' ').then(|| term.to_string())
        })
        .collect()
}
