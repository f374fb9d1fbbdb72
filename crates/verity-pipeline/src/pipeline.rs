//! End-to-end research orchestration

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metrics::RunMetrics;
use crate::prompt::ResearchPrompt;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::{Arc, LazyLock};
use std::time::Instant;
use tokio::task::spawn_blocking;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use verity_checker::{CheckerConfig, FactChecker};
use verity_domain::traits::{SourceRetriever, TextGenerator};
use verity_domain::{Severity, SourceRecord, VerificationResult};
use verity_fixer::{FixerConfig, TargetedFixer};
use verity_memory::ResearchMemory;

/// Double-quoted phrases in generated text, searched verbatim
static QUOTED_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("quoted phrase pattern is valid"));

/// Multi-word capitalized phrases, a cheap proper-noun heuristic
static PROPER_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").expect("proper phrase pattern is valid")
});

/// Everything a finished run hands back to the caller
#[derive(Debug, Clone)]
pub struct ResearchOutput {
    /// The final research text, repaired if verification found errors
    pub research: String,

    /// Per-claim verification results for the generated draft
    pub results: Vec<VerificationResult>,

    /// Measurements for this run
    pub metrics: RunMetrics,

    /// Domain the run was recorded under
    pub domain: String,

    /// Patterns now stored for the domain, after learning
    pub learned_patterns: usize,
}

/// Orchestrates generate, verify, repair, and learn for one request
///
/// The generator is called exactly once per run to produce the draft;
/// verification failures are repaired by targeted edits, never by
/// regeneration. Each run ends by feeding its outcome back into the
/// memory store, so the next run in the same domain starts with a better
/// prompt.
///
/// # Examples
///
/// ```
/// use verity_llm::{MockGenerator, MockRetriever};
/// use verity_memory::ResearchMemory;
/// use verity_pipeline::ResearchPipeline;
///
/// # async fn run() {
/// let dir = tempfile::tempdir().unwrap();
/// let memory = ResearchMemory::load(dir.path().join("memory.json"));
/// let mut pipeline = ResearchPipeline::new(
///     MockGenerator::new("Solar capacity doubled in 2023."),
///     MockRetriever::default(),
///     memory,
/// );
///
/// let output = pipeline.generate_research("solar power", "energy", None).await.unwrap();
/// assert!(!output.research.is_empty());
/// # }
/// ```
pub struct ResearchPipeline<G, R>
where
    G: TextGenerator + Send + Sync + 'static,
    G::Error: Display + Send + 'static,
    R: SourceRetriever + Send + Sync + 'static,
    R::Error: Display + Send + 'static,
{
    generator: Arc<G>,
    retriever: Arc<R>,
    checker: FactChecker<Arc<R>>,
    fixer: TargetedFixer,
    memory: ResearchMemory,
    config: PipelineConfig,
}

impl<G, R> ResearchPipeline<G, R>
where
    G: TextGenerator + Send + Sync + 'static,
    G::Error: Display + Send + 'static,
    R: SourceRetriever + Send + Sync + 'static,
    R::Error: Display + Send + 'static,
{
    /// Create a pipeline with default checker, fixer, and timeout settings
    pub fn new(generator: G, retriever: R, memory: ResearchMemory) -> Self {
        let retriever = Arc::new(retriever);
        let checker =
            FactChecker::new(CheckerConfig::default()).with_retriever(Arc::clone(&retriever));

        Self {
            generator: Arc::new(generator),
            retriever,
            checker,
            fixer: TargetedFixer::new(FixerConfig::default()),
            memory,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the pipeline configuration
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the checker configuration
    pub fn with_checker_config(mut self, config: CheckerConfig) -> Self {
        self.checker = FactChecker::new(config).with_retriever(Arc::clone(&self.retriever));
        self
    }

    /// Replace the fixer configuration
    pub fn with_fixer_config(mut self, config: FixerConfig) -> Self {
        self.fixer = TargetedFixer::new(config);
        self
    }

    /// Read access to the learning store
    pub fn memory(&self) -> &ResearchMemory {
        &self.memory
    }

    /// Run one research request end to end
    ///
    /// Fails only when the generation call errors or times out, or when
    /// the learning store cannot be written; a failed source search is
    /// logged and skipped.
    pub async fn generate_research(
        &mut self,
        topic: &str,
        domain: &str,
        user_requirements: Option<&str>,
    ) -> Result<ResearchOutput, PipelineError> {
        let started = Instant::now();
        info!("Starting research run for '{}' in domain '{}'", topic, domain);

        let context = self.memory.get_relevant_context(topic, domain);
        let mut prompt = ResearchPrompt::new(topic, domain).with_context(&context);
        if let Some(requirements) = user_requirements {
            prompt = prompt.with_requirements(requirements);
        }

        let generated = self.call_generator(prompt.build()).await?;
        let mut api_calls: u32 = 1;

        let sources = self.gather_sources(topic, &generated).await;
        let results = self.checker.verify_research(&generated, &sources);

        let has_errors = results.iter().any(|r| r.severity == Severity::Error);
        let research = if has_errors {
            // Targeted repair counts as one more call against the budget
            api_calls += 1;
            self.fixer.fix_issues(&generated, &results)
        } else {
            generated
        };

        self.memory
            .learn_from_research(&research, &results, domain, None)?;
        let learned_patterns = self.memory.get_patterns(domain).len();

        let error_count = results
            .iter()
            .filter(|r| r.severity == Severity::Error)
            .count();
        let metrics = RunMetrics {
            total_time_secs: started.elapsed().as_secs_f64(),
            api_calls,
            estimated_cost: f64::from(api_calls) * self.config.cost_per_call,
            claims_verified: results.len(),
            error_rate: if results.is_empty() {
                0.0
            } else {
                error_count as f64 / results.len() as f64
            },
            sources_used: sources.len(),
        };

        info!("Research run finished: {}", metrics.summary());
        Ok(ResearchOutput {
            research,
            results,
            metrics,
            domain: domain.to_string(),
            learned_patterns,
        })
    }

    /// Verify a finished text and repair every unsupported claim
    ///
    /// Unlike [`generate_research`](Self::generate_research), repair here
    /// is per claim and unconditional: any unsupported claim with a
    /// suggested fix is edited, regardless of how many there are.
    pub fn verify_and_fix(&mut self, text: &str) -> String {
        let results = self.checker.verify_research(text, &[]);

        let mut fixed = text.to_string();
        for result in &results {
            if !result.is_supported && result.suggested_fix.is_some() {
                fixed = self.fixer.apply_fix(&fixed, result);
            }
        }
        fixed
    }

    /// The single generation call, bounded by the configured timeout
    async fn call_generator(&self, prompt: String) -> Result<String, PipelineError> {
        let generator = Arc::clone(&self.generator);
        let call = spawn_blocking(move || generator.generate(&prompt));

        match timeout(self.config.generator_timeout(), call).await {
            Ok(Ok(Ok(text))) => Ok(text),
            Ok(Ok(Err(e))) => Err(PipelineError::Generator(e.to_string())),
            Ok(Err(join_error)) => Err(PipelineError::Generator(join_error.to_string())),
            Err(_) => Err(PipelineError::GeneratorTimeout(
                self.config.generator_timeout_secs,
            )),
        }
    }

    /// Search evidence sources for the draft's key terms
    ///
    /// One query per term, each bounded by the retrieval timeout. A term
    /// whose search fails or times out is skipped; the run continues with
    /// whatever the other terms produced. Results are deduplicated by
    /// identifier across terms.
    async fn gather_sources(&self, topic: &str, text: &str) -> Vec<SourceRecord> {
        let terms = extract_key_terms(text, self.config.max_search_terms);
        debug!("Searching sources for {} key terms", terms.len());

        let mut sources = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for term in terms {
            let query = format!("{} {}", topic, term);
            let retriever = Arc::clone(&self.retriever);
            let task_query = query.clone();
            let call = spawn_blocking(move || retriever.search(&task_query));

            match timeout(self.config.retrieval_timeout(), call).await {
                Ok(Ok(Ok(records))) => {
                    for record in records {
                        if seen.insert(record.identifier().to_string()) {
                            sources.push(record);
                        }
                    }
                }
                Ok(Ok(Err(e))) => {
                    warn!("Search for '{}' failed, skipping: {}", query, e);
                }
                Ok(Err(join_error)) => {
                    warn!("Search for '{}' panicked, skipping: {}", query, join_error);
                }
                Err(_) => {
                    warn!("Search for '{}' timed out, skipping", query);
                }
            }
        }

        sources
    }
}

/// Key terms worth searching, at most `limit`
///
/// Quoted phrases come first, then multi-word capitalized phrases, in
/// order of appearance and deduplicated.
fn extract_key_terms(text: &str, limit: usize) -> Vec<String> {
    let mut terms = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for capture in QUOTED_PHRASE.captures_iter(text) {
        let term = capture[1].trim().to_string();
        if !term.is_empty() && seen.insert(term.clone()) {
            terms.push(term);
        }
    }

    for phrase in PROPER_PHRASE.find_iter(text) {
        let term = phrase.as_str().to_string();
        if seen.insert(term.clone()) {
            terms.push(term);
        }
    }

    terms.truncate(limit);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_terms_prefer_quoted_phrases() {
        let text = r#"The "solar duck curve" affects Grid Operators across California Valley."#;
        let terms = extract_key_terms(text, 5);

        assert_eq!(
            terms,
            vec!["solar duck curve", "Grid Operators", "California Valley"]
        );
    }

    #[test]
    fn test_key_terms_respect_limit() {
        let text = "Alpha Beta. Gamma Delta. Epsilon Zeta. Eta Theta. Iota Kappa. Lambda Mu.";
        let terms = extract_key_terms(text, 5);
        assert_eq!(terms.len(), 5);
    }

    #[test]
    fn test_key_terms_deduplicate() {
        let text = r#""Machine Learning" and Machine Learning and "Machine Learning" again."#;
        let terms = extract_key_terms(text, 5);
        assert_eq!(terms, vec!["Machine Learning"]);
    }

    #[test]
    fn test_single_capitalized_words_are_ignored() {
        let terms = extract_key_terms("Rust is great and Tokio is great too.", 5);
        assert!(terms.is_empty());
    }

    #[test]
    fn test_no_terms_in_plain_prose() {
        let terms = extract_key_terms("nothing here is quoted or capitalized", 5);
        assert!(terms.is_empty());
    }
}
