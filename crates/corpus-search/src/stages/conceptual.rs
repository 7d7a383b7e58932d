//! Stage 1: exact/near-exact title matches for concept terms.
//!
//! Highest-confidence results. Never penalized; store errors propagate,
//! a legitimate miss returns empty.

use std::collections::BTreeSet;

use corpus_core::config::ScoringWeights;
use corpus_core::errors::SearchResult;
use corpus_core::models::{
    ClassifiedQuery, MetadataFilter, ScoreContribution, ScoredResult, Stage,
};
use corpus_core::traits::ICorpusStore;

pub fn run(
    store: &dyn ICorpusStore,
    classified: &ClassifiedQuery,
    filter: Option<&MetadataFilter>,
    limit: usize,
    weights: &ScoringWeights,
) -> SearchResult<Vec<ScoredResult>> {
    // Without definitional intent there is nothing for this stage to do.
    if !classified.is_conceptual || classified.concept_terms.is_empty() {
        return Ok(Vec::new());
    }

    let score = weights.conceptual_base + weights.conceptual_query_bonus;
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut results = Vec::new();

    for term in &classified.concept_terms {
        for document in store.find_by_title_match(term, filter, limit)? {
            if !seen.insert(document.id.clone()) {
                continue;
            }
            results.push(ScoredResult {
                document,
                score,
                stage: Stage::Conceptual,
                contributions: vec![
                    ScoreContribution::new("conceptual-base", weights.conceptual_base),
                    ScoreContribution::new(
                        "conceptual-intent-bonus",
                        weights.conceptual_query_bonus,
                    ),
                ],
            });
        }
    }

    // Equal scores within the stage: order by id for determinism.
    results.sort_by(|a, b| a.document.id.cmp(&b.document.id));
    results.truncate(limit);
    Ok(results)
}
