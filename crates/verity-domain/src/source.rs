//! Evidence source records and source-type classification

use serde::{Deserialize, Serialize};

/// Classification of an evidence source by its identifier
///
/// The hierarchy is checked top to bottom; the first match wins:
/// preprint > academic > institutional > general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Preprint servers (arxiv)
    Preprint,
    /// Academic publishers and databases (doi.org, .edu, scholar, pubmed)
    Academic,
    /// Government and organization sites (.gov, .org)
    Institutional,
    /// Everything else
    General,
}

impl SourceType {
    /// Classify a source identifier (URL or title)
    pub fn classify(identifier: &str) -> Self {
        let id = identifier.to_lowercase();
        if id.contains("arxiv") {
            SourceType::Preprint
        } else if id.contains("doi.org")
            || id.contains(".edu")
            || id.contains("scholar")
            || id.contains("pubmed")
        {
            SourceType::Academic
        } else if id.contains(".gov") || id.contains(".org") {
            SourceType::Institutional
        } else {
            SourceType::General
        }
    }

    /// String form used in pattern data
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Preprint => "preprint",
            SourceType::Academic => "academic",
            SourceType::Institutional => "institutional",
            SourceType::General => "general",
        }
    }
}

/// An evidence source as returned by a retriever
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Source URL, may be empty for offline corpora
    #[serde(default)]
    pub url: String,

    /// Source title
    #[serde(default)]
    pub title: String,

    /// Full or partial body text
    #[serde(default)]
    pub content: String,

    /// Short excerpt shown in search results
    #[serde(default)]
    pub snippet: String,
}

impl SourceRecord {
    /// Create a record from its four text fields
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            snippet: snippet.into(),
        }
    }

    /// Identifier used in supporting-source lists: URL when present,
    /// otherwise title
    pub fn identifier(&self) -> &str {
        if self.url.is_empty() {
            &self.title
        } else {
            &self.url
        }
    }

    /// Text used for overlap scoring: content and snippet joined
    pub fn match_text(&self) -> String {
        format!("{} {}", self.content, self.snippet)
    }

    /// Classified source type of this record's identifier
    pub fn source_type(&self) -> SourceType {
        SourceType::classify(self.identifier())
    }
}
