use serde::{Deserialize, Serialize};

use super::document::Document;
use crate::constants::SNIPPET_MAX_CHARS;

/// The pipeline stage a result originated from. First stage to claim a
/// document wins; later stages never re-score it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Conceptual,
    Text,
    Keyword,
    Semantic,
}

/// One labeled component of a result's score, kept in application order
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub label: String,
    pub amount: f64,
}

impl ScoreContribution {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// A document with its relevance score. The engine moves documents out of
/// store results; it never copies or mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub document: Document,
    /// Higher = more relevant.
    pub score: f64,
    pub stage: Stage,
    /// Ordered score breakdown. Raw contributions are preserved even when
    /// the merged score is clamped for monotonicity.
    pub contributions: Vec<ScoreContribution>,
}

/// The final ordered result of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResultSet {
    /// Scores are monotonically non-increasing by position.
    pub results: Vec<ScoredResult>,
    /// Deduplicated candidate count before truncation to the limit.
    pub total_candidates: usize,
    pub limit_applied: usize,
}

impl RankedResultSet {
    pub fn empty(limit_applied: usize) -> Self {
        Self {
            results: Vec::new(),
            total_candidates: 0,
            limit_applied,
        }
    }
}

/// One row of the engine-facing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub document_id: String,
    pub title: String,
    pub score: f64,
    pub stage: Stage,
    /// Content truncated for transport; full text stays in the store.
    pub snippet: String,
}

/// The wire-shaped response consumed by the HTTP / tool-invocation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total_candidates: usize,
    pub limit_applied: usize,
}

impl From<&RankedResultSet> for SearchResponse {
    fn from(set: &RankedResultSet) -> Self {
        Self {
            results: set
                .results
                .iter()
                .map(|r| SearchHit {
                    document_id: r.document.id.clone(),
                    title: r.document.title.clone(),
                    score: r.score,
                    stage: r.stage,
                    snippet: snippet(&r.document.content),
                })
                .collect(),
            total_candidates: set.total_candidates,
            limit_applied: set.limit_applied,
        }
    }
}

/// Truncate content to the snippet limit on a char boundary.
fn snippet(content: &str) -> String {
    if content.chars().count() <= SNIPPET_MAX_CHARS {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{truncated}...")
    }
}
