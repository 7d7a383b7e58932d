use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::document::MetadataFilter;
use crate::config::defaults;

/// Which retrieval path serves the request. The two paths are mutually
/// exclusive per request, never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Conceptual → scored text → keyword fallback, merged in stage order.
    #[default]
    Staged,
    /// Single-pass aggregate scoring.
    Semantic,
}

/// An engine-facing search request. Lives only for the request's duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    /// Positive; clamped to `max_limit` by the engine. Zero is rejected
    /// as `InvalidQuery`.
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub metadata_filter: Option<MetadataFilter>,
    #[serde(default)]
    pub mode: SearchMode,
}

fn default_limit() -> usize {
    defaults::DEFAULT_LIMIT
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: defaults::DEFAULT_LIMIT,
            metadata_filter: None,
            mode: SearchMode::Staged,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.metadata_filter = Some(filter);
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A query plus the classifier's derived flags. Produced once per request
/// and threaded through every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedQuery {
    /// The raw query as the caller sent it.
    pub raw: String,
    /// Trimmed, lowercased form all matching runs against.
    pub normalized: String,
    /// Definitional intent: "what is X" phrasing or a standalone concept.
    pub is_conceptual: bool,
    /// Candidate terms for exact/near-exact title matching.
    pub concept_terms: BTreeSet<String>,
    /// Compound phrases that signal technical rather than definitional use.
    pub technical_phrases: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_staged() {
        let req: SearchRequest = serde_json::from_str(r#"{"query": "caching"}"#).unwrap();
        assert_eq!(req.mode, SearchMode::Staged);
        assert_eq!(req.limit, defaults::DEFAULT_LIMIT);
        assert!(req.metadata_filter.is_none());
    }

    #[test]
    fn semantic_mode_parses() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"query": "caching", "mode": "semantic", "limit": 5}"#)
                .unwrap();
        assert_eq!(req.mode, SearchMode::Semantic);
        assert_eq!(req.limit, 5);
    }
}
