use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::query::SearchMode;

/// Per-request diagnostics: the classification decision and per-stage
/// candidate counts. Structured data only; the caller decides whether
/// and how to log it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDiagnostics {
    pub mode: SearchMode,
    pub is_conceptual: bool,
    pub concept_terms: BTreeSet<String>,
    pub technical_phrases: BTreeSet<String>,
    /// Candidates each stage produced before merging. Stages that did not
    /// run report zero.
    pub conceptual_count: usize,
    pub text_count: usize,
    pub keyword_count: usize,
    pub semantic_count: usize,
}

impl SearchDiagnostics {
    pub fn for_mode(mode: SearchMode) -> Self {
        Self {
            mode,
            is_conceptual: false,
            concept_terms: BTreeSet::new(),
            technical_phrases: BTreeSet::new(),
            conceptual_count: 0,
            text_count: 0,
            keyword_count: 0,
            semantic_count: 0,
        }
    }
}
