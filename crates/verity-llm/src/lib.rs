//! Verity Collaborator Layer
//!
//! Pluggable implementations of the generator and retriever boundary
//! traits from `verity-domain`.
//!
//! Real backends (LLM clients, search APIs) live outside this workspace;
//! they implement the same traits and surface failures through
//! [`LlmError`]. The crate ships `MockGenerator` and `MockRetriever`,
//! deterministic call-counted providers that the checker and pipeline
//! tests drive.
//!
//! # Examples
//!
//! ```
//! use verity_llm::MockGenerator;
//! use verity_domain::traits::TextGenerator;
//!
//! let generator = MockGenerator::new("Hello from LLM!");
//! let result = generator.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use verity_domain::traits::{SourceRetriever, TextGenerator};
use verity_domain::SourceRecord;

/// Errors that can occur in generator or retriever operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Generic error
    #[error("Provider error: {0}")]
    Other(String),
}

/// Mock text generator for deterministic testing
///
/// Returns pre-configured responses without any network calls and counts
/// how many times it was invoked, which the pipeline tests use to assert
/// the single-generation property.
///
/// # Examples
///
/// ```
/// use verity_llm::MockGenerator;
/// use verity_domain::traits::TextGenerator;
///
/// let mut generator = MockGenerator::new("default");
/// generator.add_response("prompt1", "response1");
/// assert_eq!(generator.generate("prompt1").unwrap(), "response1");
/// assert_eq!(generator.generate("anything else").unwrap(), "default");
/// assert_eq!(generator.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerator {
    /// Create a generator returning a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Configure an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), "ERROR".to_string());
    }

    /// Number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call counter
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGenerator for MockGenerator {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            if response == "ERROR" {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

/// Mock source retriever for deterministic testing
///
/// Maps queries to fixed result sets; unknown queries return the default
/// result set (empty unless configured).
///
/// # Examples
///
/// ```
/// use verity_llm::MockRetriever;
/// use verity_domain::traits::SourceRetriever;
/// use verity_domain::SourceRecord;
///
/// let mut retriever = MockRetriever::default();
/// retriever.add_results("rust", vec![
///     SourceRecord::new("https://rust-lang.org", "Rust", "systems language", ""),
/// ]);
/// assert_eq!(retriever.search("rust").unwrap().len(), 1);
/// assert!(retriever.search("other").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRetriever {
    default_results: Vec<SourceRecord>,
    results: Arc<Mutex<HashMap<String, Vec<SourceRecord>>>>,
    errors: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockRetriever {
    /// Create a retriever returning the same records for every query
    pub fn with_default_results(records: Vec<SourceRecord>) -> Self {
        Self {
            default_results: records,
            ..Default::default()
        }
    }

    /// Add a result set for a specific query
    pub fn add_results(&mut self, query: impl Into<String>, records: Vec<SourceRecord>) {
        self.results.lock().unwrap().insert(query.into(), records);
    }

    /// Configure an error for a specific query
    pub fn add_error(&mut self, query: impl Into<String>) {
        self.errors.lock().unwrap().push(query.into());
    }

    /// Number of times search was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl SourceRetriever for MockRetriever {
    type Error = LlmError;

    fn search(&self, query: &str) -> Result<Vec<SourceRecord>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.errors.lock().unwrap().iter().any(|q| q == query) {
            return Err(LlmError::Other("Mock retrieval error".to_string()));
        }

        let results = self.results.lock().unwrap();
        if let Some(records) = results.get(query) {
            return Ok(records.clone());
        }

        Ok(self.default_results.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_generator_default() {
        let generator = MockGenerator::new("Test response");
        assert_eq!(generator.generate("any prompt").unwrap(), "Test response");
    }

    #[test]
    fn test_mock_generator_specific_responses() {
        let mut generator = MockGenerator::default();
        generator.add_response("hello", "world");

        assert_eq!(generator.generate("hello").unwrap(), "world");
        assert_eq!(generator.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_generator_call_count() {
        let generator = MockGenerator::new("test");
        assert_eq!(generator.call_count(), 0);

        generator.generate("p1").unwrap();
        generator.generate("p2").unwrap();
        assert_eq!(generator.call_count(), 2);

        generator.reset_call_count();
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_mock_generator_error() {
        let mut generator = MockGenerator::default();
        generator.add_error("bad prompt");

        let result = generator.generate("bad prompt");
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_generator_clone_shares_count() {
        let g1 = MockGenerator::new("test");
        let g2 = g1.clone();

        g1.generate("test").unwrap();

        // Both share the same counter through the Arc
        assert_eq!(g1.call_count(), 1);
        assert_eq!(g2.call_count(), 1);
    }

    #[test]
    fn test_mock_retriever_defaults_empty() {
        let retriever = MockRetriever::default();
        assert!(retriever.search("anything").unwrap().is_empty());
        assert_eq!(retriever.call_count(), 1);
    }

    #[test]
    fn test_mock_retriever_query_results() {
        let mut retriever = MockRetriever::default();
        retriever.add_results(
            "climate",
            vec![SourceRecord::new("https://noaa.gov", "NOAA", "climate data", "")],
        );

        let results = retriever.search("climate").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "NOAA");
    }

    #[test]
    fn test_mock_retriever_error_injection() {
        let mut retriever = MockRetriever::default();
        retriever.add_error("failing query");

        assert!(retriever.search("failing query").is_err());
        assert!(retriever.search("other query").is_ok());
    }
}
