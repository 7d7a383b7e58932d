//! Semantic mode: one aggregation-style store query, one combined score.
//!
//! The store supplies its aggregate text-match base; the engine layers
//! title bonuses, a content-length band preference, an exponentially
//! decaying recency bonus, and the stage-2 technical-phrase penalty.
//! Independent of the staged pipeline, never blended with it.

use chrono::{DateTime, Utc};

use corpus_core::config::SearchConfig;
use corpus_core::constants::DEFINITIONAL_INDICATORS;
use corpus_core::errors::SearchResult;
use corpus_core::models::{
    ClassifiedQuery, MetadataFilter, RankedResultSet, ScoreContribution, ScoredResult, Stage,
};
use corpus_core::traits::ICorpusStore;

use crate::classify;
use crate::stages::text::technical_compound_count;

pub fn run(
    store: &dyn ICorpusStore,
    classified: &ClassifiedQuery,
    filter: Option<&MetadataFilter>,
    limit: usize,
    now: DateTime<Utc>,
    config: &SearchConfig,
) -> SearchResult<RankedResultSet> {
    let overfetch = limit.saturating_mul(config.overfetch_multiplier).max(limit);
    let hits = store.aggregate_semantic(&classified.raw, filter, overfetch)?;

    let weights = &config.scoring;
    let mut results: Vec<ScoredResult> = Vec::new();

    for (document, base) in hits {
        let title = classify::normalize(&document.title);
        let content = classify::normalize(&document.content);
        let mut contributions = vec![ScoreContribution::new("aggregate-text-score", base)];
        let mut score = base;

        if title.contains(&classified.normalized)
            || classified
                .concept_terms
                .iter()
                .any(|t| title.contains(t.as_str()))
        {
            contributions.push(ScoreContribution::new(
                "title-bonus",
                weights.semantic_title_bonus,
            ));
            score += weights.semantic_title_bonus;
        }

        if classified
            .concept_terms
            .iter()
            .any(|t| title == format!("what is {t}"))
        {
            contributions.push(ScoreContribution::new(
                "conceptual-title-bonus",
                weights.semantic_conceptual_title_bonus,
            ));
            score += weights.semantic_conceptual_title_bonus;
        }

        let chars = document.content.chars().count();
        if chars >= weights.length_band_min_chars && chars <= weights.length_band_max_chars {
            contributions.push(ScoreContribution::new(
                "length-band-bonus",
                weights.length_band_bonus,
            ));
            score += weights.length_band_bonus;
        } else if chars < weights.length_extreme_short_chars
            || chars > weights.length_extreme_long_chars
        {
            contributions.push(ScoreContribution::new(
                "length-extreme-penalty",
                -weights.length_extreme_penalty,
            ));
            score -= weights.length_extreme_penalty;
        }

        let age_days = (now - document.ingested_at).num_days().max(0) as f64;
        let recency = weights.recency_weight * (-age_days / weights.recency_half_life_days).exp();
        contributions.push(ScoreContribution::new("recency-bonus", recency));
        score += recency;

        let text = format!("{title} {content}");
        let compounds = technical_compound_count(&text, classified, config);
        if compounds > 0 {
            let penalty = compounds as f64 * weights.semantic_technical_penalty;
            contributions.push(ScoreContribution::new("technical-phrase-penalty", -penalty));
            score -= penalty;
        }

        if DEFINITIONAL_INDICATORS.iter().any(|i| content.contains(i)) {
            contributions.push(ScoreContribution::new(
                "definitional-bonus",
                weights.semantic_definitional_bonus,
            ));
            score += weights.semantic_definitional_bonus;
        }

        results.push(ScoredResult {
            document,
            score: score.max(weights.text_score_floor),
            stage: Stage::Semantic,
            contributions,
        });
    }

    // Score descending; ties newest first, then id.
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.document.ingested_at.cmp(&a.document.ingested_at))
            .then_with(|| a.document.id.cmp(&b.document.id))
    });

    let total_candidates = results.len();
    results.truncate(limit);

    Ok(RankedResultSet {
        results,
        total_candidates,
        limit_applied: limit,
    })
}
