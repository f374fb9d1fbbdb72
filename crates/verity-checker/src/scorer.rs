//! Token-overlap support scoring
//!
//! The built-in support heuristic: the fraction of a claim's significant
//! tokens that also appear in the source text. It sits behind the
//! `MatchScorer` trait so a semantic scorer can replace it without touching
//! the checker's control flow.

use std::collections::HashSet;
use verity_domain::traits::MatchScorer;

/// Keyword-overlap scorer
///
/// Tokens are lowercased alphanumeric runs strictly longer than
/// `min_token_len`. The score is `|claim ∩ source| / |claim|`, 0.0 when the
/// claim has no significant tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenOverlapScorer {
    min_token_len: usize,
}

impl TokenOverlapScorer {
    /// Create a scorer keeping tokens longer than `min_token_len`
    pub fn new(min_token_len: usize) -> Self {
        Self { min_token_len }
    }

    /// Significant tokens of a text
    fn tokens(&self, text: &str) -> HashSet<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() > self.min_token_len)
            .map(|t| t.to_lowercase())
            .collect()
    }
}

impl Default for TokenOverlapScorer {
    fn default() -> Self {
        Self::new(3)
    }
}

impl MatchScorer for TokenOverlapScorer {
    fn score(&self, claim_text: &str, source_text: &str) -> f64 {
        let claim_tokens = self.tokens(claim_text);
        if claim_tokens.is_empty() {
            return 0.0;
        }
        let source_tokens = self.tokens(source_text);
        let shared = claim_tokens.intersection(&source_tokens).count();
        shared as f64 / claim_tokens.len() as f64
    }
}
