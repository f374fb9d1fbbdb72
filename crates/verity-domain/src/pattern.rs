//! Learned research patterns and per-domain knowledge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};

/// Category of a learned pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Document structure characteristics (sections, citation density)
    Structure,
    /// Source mix characteristics (diversity, primary type)
    SourceQuality,
    /// Claims-per-section characteristics
    ClaimDensity,
}

impl PatternKind {
    /// String form used in pattern summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Structure => "structure",
            PatternKind::SourceQuality => "source_quality",
            PatternKind::ClaimDensity => "claim_density",
        }
    }
}

/// A learned, domain-scoped record of what characteristics correlated with
/// verification success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPattern {
    /// Pattern category
    pub kind: PatternKind,

    /// Domain partition key (e.g. "medicine", "general")
    pub domain: String,

    /// Verification rate or user rating that produced this pattern
    pub success_metric: f64,

    /// Arbitrary nested measurements keyed by name
    pub data: Map<String, Value>,

    /// Times this pattern was handed out as context
    #[serde(default)]
    pub usage_count: u64,

    /// When this pattern was last handed out as context
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

impl ResearchPattern {
    /// Create a new pattern with zero usage
    pub fn new(kind: PatternKind, domain: impl Into<String>, success_metric: f64) -> Self {
        Self {
            kind,
            domain: domain.into(),
            success_metric,
            data: Map::new(),
            usage_count: 0,
            last_used: None,
        }
    }

    /// Attach a named measurement
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Read a numeric measurement, if present
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(Value::as_f64)
    }

    /// Mark this pattern as used now
    pub fn mark_used(&mut self) {
        self.usage_count += 1;
        self.last_used = Some(Utc::now());
    }
}

/// Accumulated per-domain statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainKnowledge {
    /// Source identifier -> times it supported a verified claim
    #[serde(default)]
    pub common_sources: HashMap<String, u64>,

    /// Capitalized-phrase terminology seen in this domain
    ///
    /// A BTreeSet so serialization is naturally sorted.
    #[serde(default)]
    pub terminology: BTreeSet<String>,

    /// Recurring fact formulations
    #[serde(default)]
    pub fact_patterns: Vec<String>,
}

impl DomainKnowledge {
    /// Record that a source supported a verified claim
    pub fn record_source(&mut self, identifier: impl Into<String>) {
        *self.common_sources.entry(identifier.into()).or_insert(0) += 1;
    }

    /// Sources ordered by descending support count
    pub fn top_sources(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .common_sources
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pattern_builder_and_metric() {
        let pattern = ResearchPattern::new(PatternKind::Structure, "medicine", 0.8)
            .with_value("section_count", json!(4))
            .with_value("citation_density", json!(0.25));

        assert_eq!(pattern.metric("section_count"), Some(4.0));
        assert_eq!(pattern.metric("citation_density"), Some(0.25));
        assert_eq!(pattern.metric("missing"), None);
        assert_eq!(pattern.usage_count, 0);
        assert!(pattern.last_used.is_none());
    }

    #[test]
    fn test_mark_used() {
        let mut pattern = ResearchPattern::new(PatternKind::SourceQuality, "general", 0.5);
        pattern.mark_used();
        pattern.mark_used();

        assert_eq!(pattern.usage_count, 2);
        assert!(pattern.last_used.is_some());
    }

    #[test]
    fn test_domain_knowledge_counts() {
        let mut knowledge = DomainKnowledge::default();
        knowledge.record_source("https://a.org");
        knowledge.record_source("https://a.org");
        knowledge.record_source("https://b.org");

        assert_eq!(knowledge.common_sources["https://a.org"], 2);

        let top = knowledge.top_sources(1);
        assert_eq!(top, vec![("https://a.org", 2)]);
    }

    #[test]
    fn test_terminology_serializes_sorted() {
        let mut knowledge = DomainKnowledge::default();
        knowledge.terminology.insert("Machine Learning".to_string());
        knowledge.terminology.insert("Clinical Trial".to_string());

        let json = serde_json::to_string(&knowledge).unwrap();
        let clinical = json.find("Clinical Trial").unwrap();
        let machine = json.find("Machine Learning").unwrap();
        assert!(clinical < machine);
    }

    #[test]
    fn test_pattern_round_trip() {
        let pattern = ResearchPattern::new(PatternKind::Structure, "medicine", 0.9)
            .with_value("has_introduction", json!(true));

        let json = serde_json::to_string(&pattern).unwrap();
        let parsed: ResearchPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(pattern, parsed);
    }
}
