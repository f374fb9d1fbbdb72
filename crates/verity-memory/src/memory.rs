//! The ResearchMemory store

use crate::analysis;
use crate::error::MemoryError;
use crate::retention::{RetentionPolicy, Unbounded};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use verity_domain::{DomainKnowledge, PatternKind, ResearchPattern, VerificationResult};

/// File name used when the store is given a directory path
const MEMORY_FILE_NAME: &str = "memory.json";

/// Structure patterns at or above this success metric are recorded as
/// reusable successful structures
const STRUCTURE_RECORD_THRESHOLD: f64 = 0.7;

/// On-disk shape of the whole store
#[derive(Debug, Default, Serialize, Deserialize)]
struct MemoryFile {
    #[serde(default)]
    patterns: HashMap<String, Vec<ResearchPattern>>,
    #[serde(default)]
    domain_knowledge: HashMap<String, DomainKnowledge>,
    #[serde(default)]
    successful_structures: Vec<Map<String, Value>>,
}

/// Learned context handed to the generation step
#[derive(Debug, Clone, Default)]
pub struct RelevantContext {
    /// The domain's patterns, best first (by success metric, then usage)
    pub domain_patterns: Vec<ResearchPattern>,

    /// The last five recorded successful structures, across all domains
    pub successful_structures: Vec<Map<String, Value>>,

    /// Accumulated statistics for the domain
    pub domain_knowledge: DomainKnowledge,

    /// Human-readable warnings derived from low-success patterns
    pub common_pitfalls: Vec<String>,
}

/// Durable cross-session learning store
///
/// State is read fully at construction and written fully after every
/// mutation. Writes go through a temp-file rename so a crash never leaves
/// a half-written store; cross-process locking is deliberately not
/// provided, so concurrent writers to one path are last-writer-wins.
///
/// # Examples
///
/// ```no_run
/// use verity_memory::ResearchMemory;
/// use verity_domain::{PatternKind, ResearchPattern};
///
/// # fn main() -> Result<(), verity_memory::MemoryError> {
/// let mut memory = ResearchMemory::load("research_memory");
/// memory.store_pattern(ResearchPattern::new(PatternKind::Structure, "medicine", 0.8))?;
/// assert_eq!(memory.get_patterns("medicine").len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ResearchMemory {
    file_path: PathBuf,
    patterns: HashMap<String, Vec<ResearchPattern>>,
    knowledge: HashMap<String, DomainKnowledge>,
    successful_structures: Vec<Map<String, Value>>,
    retention: Box<dyn RetentionPolicy>,
}

impl ResearchMemory {
    /// Open a store backed by `path`
    ///
    /// `path` may be the JSON file itself or a directory, in which case
    /// `memory.json` inside it is used. A missing or unparseable backing
    /// file is logged and yields an empty store.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_path = if path.is_dir() {
            path.join(MEMORY_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let state = Self::read_state(&file_path);
        Self {
            file_path,
            patterns: state.patterns,
            knowledge: state.domain_knowledge,
            successful_structures: state.successful_structures,
            retention: Box::new(Unbounded),
        }
    }

    /// Replace the retention policy
    pub fn with_retention(mut self, retention: Box<dyn RetentionPolicy>) -> Self {
        self.retention = retention;
        self
    }

    fn read_state(file_path: &Path) -> MemoryFile {
        if !file_path.exists() {
            debug!("No memory file at {}, starting empty", file_path.display());
            return MemoryFile::default();
        }

        let raw = match fs::read_to_string(file_path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read memory file {}: {}", file_path.display(), e);
                return MemoryFile::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to parse memory file {}: {}", file_path.display(), e);
                MemoryFile::default()
            }
        }
    }

    /// Store a pattern under its domain and flush to disk
    pub fn store_pattern(&mut self, pattern: ResearchPattern) -> Result<(), MemoryError> {
        let domain_patterns = self.patterns.entry(pattern.domain.clone()).or_default();
        domain_patterns.push(pattern);
        self.retention.trim_patterns(domain_patterns);
        self.persist()
    }

    /// Patterns stored for a domain, empty if the domain is unknown
    pub fn get_patterns(&self, domain: &str) -> &[ResearchPattern] {
        self.patterns.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Learned context for a new research request
    ///
    /// Returned domain patterns are marked used (usage count and last-used
    /// timestamp); the bumps reach disk with the next flush.
    pub fn get_relevant_context(&mut self, topic: &str, domain: &str) -> RelevantContext {
        debug!("Building context for topic '{}' in domain '{}'", topic, domain);

        let domain_patterns = match self.patterns.get_mut(domain) {
            Some(patterns) => {
                let mut sorted = patterns.clone();
                sorted.sort_by(|a, b| {
                    b.success_metric
                        .total_cmp(&a.success_metric)
                        .then_with(|| b.usage_count.cmp(&a.usage_count))
                });
                for pattern in patterns.iter_mut() {
                    pattern.mark_used();
                }
                sorted
            }
            None => Vec::new(),
        };

        let successful_structures = self
            .successful_structures
            .iter()
            .rev()
            .take(5)
            .rev()
            .cloned()
            .collect();

        let common_pitfalls = Self::pitfalls(&domain_patterns);
        let domain_knowledge = self.knowledge.get(domain).cloned().unwrap_or_default();

        RelevantContext {
            domain_patterns,
            successful_structures,
            domain_knowledge,
            common_pitfalls,
        }
    }

    /// Pitfall strings derived from low-success patterns
    fn pitfalls(patterns: &[ResearchPattern]) -> Vec<String> {
        let mut pitfalls = Vec::new();

        for pattern in patterns.iter().filter(|p| p.success_metric < 0.5) {
            match pattern.kind {
                PatternKind::Structure => {
                    if pattern.metric("citation_density").unwrap_or(f64::MAX) < 0.5 {
                        let msg = "Low citation density correlates with failed verification \
                                   in this domain; cite each factual claim"
                            .to_string();
                        if !pitfalls.contains(&msg) {
                            pitfalls.push(msg);
                        }
                    }
                }
                PatternKind::SourceQuality => {
                    if pattern.metric("source_diversity").unwrap_or(f64::MAX) < 2.0 {
                        let msg = "Limited source diversity weakens verification; \
                                   draw on a broader mix of source types"
                            .to_string();
                        if !pitfalls.contains(&msg) {
                            pitfalls.push(msg);
                        }
                    }
                }
                PatternKind::ClaimDensity => {}
            }
        }

        pitfalls
    }

    /// Learn from a finished research run and flush to disk
    ///
    /// Derives a structure pattern and a source-quality pattern, updates
    /// the domain's source counts and terminology, and returns the run's
    /// verification rate.
    pub fn learn_from_research(
        &mut self,
        text: &str,
        results: &[VerificationResult],
        domain: &str,
        user_rating: Option<f64>,
    ) -> Result<f64, MemoryError> {
        let rate = analysis::verification_rate(results);

        let structure =
            analysis::structure_pattern(text, domain, user_rating.unwrap_or(rate));
        let source_quality = analysis::source_quality_pattern(results, domain, rate);

        if structure.success_metric >= STRUCTURE_RECORD_THRESHOLD {
            self.successful_structures.push(structure.data.clone());
        }

        let domain_patterns = self.patterns.entry(domain.to_string()).or_default();
        domain_patterns.push(structure);
        domain_patterns.push(source_quality);
        self.retention.trim_patterns(domain_patterns);

        let knowledge = self.knowledge.entry(domain.to_string()).or_default();
        for result in results.iter().filter(|r| r.is_supported) {
            for source in &result.supporting_sources {
                knowledge.record_source(source.clone());
            }
        }
        knowledge
            .terminology
            .extend(analysis::extract_terminology(text));
        self.retention.trim_sources(&mut knowledge.common_sources);

        info!(
            "Learned from research in domain '{}': verification rate {:.2}, {} claims",
            domain,
            rate,
            results.len()
        );

        self.persist()?;
        Ok(rate)
    }

    /// Write the full state to disk atomically
    fn persist(&self) -> Result<(), MemoryError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let state = MemoryFile {
            patterns: self.patterns.clone(),
            domain_knowledge: self.knowledge.clone(),
            successful_structures: self.successful_structures.clone(),
        };
        let serialized = serde_json::to_string_pretty(&state)?;

        // Temp file in the same directory so the rename stays on one
        // filesystem
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized)?;
        fs::rename(&tmp_path, &self.file_path)?;

        debug!("Persisted memory state to {}", self.file_path.display());
        Ok(())
    }
}
