//! Growth policies for the learning store
//!
//! Learned patterns, common-source counts, and terminology grow without
//! limit unless a policy says otherwise. The seam makes that growth an
//! explicit choice: `Unbounded` keeps everything, `KeepTopN` caps each
//! collection.

use std::collections::HashMap;
use verity_domain::ResearchPattern;

/// Strategy applied after every mutation of a domain's collections
pub trait RetentionPolicy: Send + Sync {
    /// Trim a domain's pattern list in place
    fn trim_patterns(&self, patterns: &mut Vec<ResearchPattern>);

    /// Trim a domain's common-source counts in place
    fn trim_sources(&self, sources: &mut HashMap<String, u64>);
}

/// Default policy: never delete anything
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl RetentionPolicy for Unbounded {
    fn trim_patterns(&self, _patterns: &mut Vec<ResearchPattern>) {}

    fn trim_sources(&self, _sources: &mut HashMap<String, u64>) {}
}

/// Capped store: keep the top-N patterns by success metric per domain and
/// the N most frequent common sources
#[derive(Debug, Clone, Copy)]
pub struct KeepTopN {
    /// Patterns retained per domain
    pub patterns_per_domain: usize,
    /// Common-source entries retained per domain
    pub sources_per_domain: usize,
}

impl KeepTopN {
    /// Create a policy with the same cap for both collections
    pub fn new(per_domain: usize) -> Self {
        Self {
            patterns_per_domain: per_domain,
            sources_per_domain: per_domain,
        }
    }
}

impl RetentionPolicy for KeepTopN {
    fn trim_patterns(&self, patterns: &mut Vec<ResearchPattern>) {
        if patterns.len() <= self.patterns_per_domain {
            return;
        }
        patterns.sort_by(|a, b| {
            b.success_metric
                .total_cmp(&a.success_metric)
                .then_with(|| b.usage_count.cmp(&a.usage_count))
        });
        patterns.truncate(self.patterns_per_domain);
    }

    fn trim_sources(&self, sources: &mut HashMap<String, u64>) {
        if sources.len() <= self.sources_per_domain {
            return;
        }
        let mut entries: Vec<(String, u64)> = sources.drain().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(self.sources_per_domain);
        sources.extend(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_domain::PatternKind;

    fn pattern(metric: f64) -> ResearchPattern {
        ResearchPattern::new(PatternKind::Structure, "test", metric)
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let policy = Unbounded;
        let mut patterns: Vec<_> = (0..100).map(|i| pattern(i as f64 / 100.0)).collect();
        policy.trim_patterns(&mut patterns);
        assert_eq!(patterns.len(), 100);
    }

    #[test]
    fn test_keep_top_n_patterns() {
        let policy = KeepTopN::new(3);
        let mut patterns = vec![pattern(0.2), pattern(0.9), pattern(0.5), pattern(0.7)];
        policy.trim_patterns(&mut patterns);

        assert_eq!(patterns.len(), 3);
        assert_eq!(patterns[0].success_metric, 0.9);
        assert!(patterns.iter().all(|p| p.success_metric >= 0.5));
    }

    #[test]
    fn test_keep_top_n_leaves_small_lists_alone() {
        let policy = KeepTopN::new(10);
        let mut patterns = vec![pattern(0.2), pattern(0.9)];
        policy.trim_patterns(&mut patterns);
        // Under the cap the list is untouched, order included
        assert_eq!(patterns[0].success_metric, 0.2);
    }

    #[test]
    fn test_keep_top_n_sources() {
        let policy = KeepTopN::new(2);
        let mut sources = HashMap::new();
        sources.insert("a".to_string(), 5u64);
        sources.insert("b".to_string(), 1);
        sources.insert("c".to_string(), 3);

        policy.trim_sources(&mut sources);

        assert_eq!(sources.len(), 2);
        assert!(sources.contains_key("a"));
        assert!(sources.contains_key("c"));
        assert!(!sources.contains_key("b"));
    }
}
