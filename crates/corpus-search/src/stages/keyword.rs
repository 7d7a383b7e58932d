//! Stage 3: broad keyword fallback.
//!
//! Invoked only when stages 1+2 under-deliver. Scores count distinct
//! matched keywords and are capped so fallback results can never outrank
//! the higher-confidence bands.

use std::collections::BTreeSet;

use corpus_core::config::SearchConfig;
use corpus_core::errors::SearchResult;
use corpus_core::models::{
    ClassifiedQuery, Document, MetadataFilter, ScoreContribution, ScoredResult, Stage,
};
use corpus_core::traits::ICorpusStore;

use crate::classify;

pub fn run(
    store: &dyn ICorpusStore,
    classified: &ClassifiedQuery,
    filter: Option<&MetadataFilter>,
    limit: usize,
    claimed: &BTreeSet<String>,
    config: &SearchConfig,
) -> SearchResult<Vec<ScoredResult>> {
    let keywords = classify::keyword_tokens(&classified.normalized, config);
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    // Over-fetch so documents already claimed by earlier stages cannot
    // crowd genuinely new candidates out of the store's window.
    let overfetch = limit.saturating_mul(config.overfetch_multiplier).max(limit);
    let weights = &config.scoring;
    let mut hits: Vec<(Document, usize)> = store
        .keyword_search(&keywords, filter, overfetch)?
        .into_iter()
        .filter(|(d, _)| !claimed.contains(&d.id))
        .collect();

    // Count descending, then id: fully deterministic.
    hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));

    let results = hits
        .into_iter()
        .map(|(document, matched)| {
            let score = (matched as f64 * weights.keyword_per_match)
                .min(weights.keyword_score_ceiling);
            ScoredResult {
                document,
                score,
                stage: Stage::Keyword,
                contributions: vec![ScoreContribution::new(
                    format!("distinct-keywords:{matched}"),
                    score,
                )],
            }
        })
        .collect();

    Ok(results)
}
