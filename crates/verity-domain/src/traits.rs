//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Infrastructure implementations live in other crates.

use crate::SourceRecord;
use std::sync::Arc;

/// Trait for text generation
///
/// Implemented by the infrastructure layer (verity-llm)
pub trait TextGenerator {
    /// Error type for generation operations
    type Error;

    /// Generate text for a prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for evidence source retrieval
///
/// Implemented by the infrastructure layer (verity-llm)
pub trait SourceRetriever {
    /// Error type for retrieval operations
    type Error;

    /// Search for sources matching a query
    fn search(&self, query: &str) -> Result<Vec<SourceRecord>, Self::Error>;
}

/// Trait for scoring a claim against a source text
///
/// The checker's control flow only depends on this narrow interface, so a
/// semantic/embedding scorer can replace the token-overlap heuristic
/// without touching it.
pub trait MatchScorer {
    /// Score in [0.0, 1.0]: how strongly `source_text` supports `claim_text`
    fn score(&self, claim_text: &str, source_text: &str) -> f64;
}

/// A retriever that never returns sources
///
/// Used when verification runs without a retrieval module configured;
/// supplemental evidence searches simply yield nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetriever;

impl SourceRetriever for NoRetriever {
    type Error = std::convert::Infallible;

    fn search(&self, _query: &str) -> Result<Vec<SourceRecord>, Self::Error> {
        Ok(Vec::new())
    }
}

impl<T: SourceRetriever> SourceRetriever for Arc<T> {
    type Error = T::Error;

    fn search(&self, query: &str) -> Result<Vec<SourceRecord>, Self::Error> {
        (**self).search(query)
    }
}

impl<T: TextGenerator> TextGenerator for Arc<T> {
    type Error = T::Error;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).generate(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_retriever_is_empty() {
        let retriever = NoRetriever;
        let results = retriever.search("anything").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_arc_delegation() {
        let retriever = Arc::new(NoRetriever);
        assert!(retriever.search("query").unwrap().is_empty());
    }
}
