//! Stage 2: the store's native text search, re-scored.
//!
//! Additive scoring with a floor at zero: native base, minus a penalty
//! per technical compound phrase, plus bonuses for definitional
//! vocabulary and title hits. Ties break on title match, then shorter
//! content, then id.

use std::collections::BTreeSet;

use corpus_core::config::SearchConfig;
use corpus_core::constants::{DEFINITIONAL_INDICATORS, TECHNICAL_CONNECTORS};
use corpus_core::errors::SearchResult;
use corpus_core::models::{
    ClassifiedQuery, MetadataFilter, ScoreContribution, ScoredResult, Stage,
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
    let overfetch = limit.saturating_mul(config.overfetch_multiplier).max(limit);
    let hits = store.text_search(&classified.raw, filter, overfetch)?;

    struct Candidate {
        result: ScoredResult,
        title_hit: bool,
        content_chars: usize,
    }

    let weights = &config.scoring;
    let mut candidates: Vec<Candidate> = Vec::new();

    for (document, native) in hits {
        if claimed.contains(&document.id) {
            continue;
        }

        let text = classify::normalize(&format!("{} {}", document.title, document.content));
        let mut contributions = Vec::new();

        let base = if native > 0.0 {
            contributions.push(ScoreContribution::new("native-score", native));
            native
        } else {
            contributions.push(ScoreContribution::new(
                "uniform-base",
                weights.text_uniform_base,
            ));
            weights.text_uniform_base
        };

        let compounds = technical_compound_count(&text, classified, config);
        let penalty = compounds as f64 * weights.technical_phrase_penalty;
        if compounds > 0 {
            contributions.push(ScoreContribution::new("technical-phrase-penalty", -penalty));
        }

        let indicators = DEFINITIONAL_INDICATORS
            .iter()
            .filter(|i| text.contains(*i))
            .count();
        let definitional = indicators as f64 * weights.definitional_bonus;
        if indicators > 0 {
            contributions.push(ScoreContribution::new("definitional-bonus", definitional));
        }

        let title_hit = title_matches(&document.title, classified, config);
        let title_bonus = if title_hit {
            contributions.push(ScoreContribution::new(
                "title-match-bonus",
                weights.title_match_bonus,
            ));
            weights.title_match_bonus
        } else {
            0.0
        };

        let score =
            (base - penalty + definitional + title_bonus).max(weights.text_score_floor);
        let content_chars = document.content.chars().count();

        candidates.push(Candidate {
            result: ScoredResult {
                document,
                score,
                stage: Stage::Text,
                contributions,
            },
            title_hit,
            content_chars,
        });
    }

    candidates.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.title_hit.cmp(&a.title_hit))
            .then_with(|| a.content_chars.cmp(&b.content_chars))
            .then_with(|| a.result.document.id.cmp(&b.result.document.id))
    });

    Ok(candidates.into_iter().map(|c| c.result).collect())
}

/// Count distinct technical compound phrases in normalized document text:
/// the classifier's detected phrases, plus (under conceptual intent)
/// connector bigrams like "launchpoint search" that signal technical
/// rather than definitional use.
pub(crate) fn technical_compound_count(
    text: &str,
    classified: &ClassifiedQuery,
    config: &SearchConfig,
) -> usize {
    let mut found: BTreeSet<String> = classified
        .technical_phrases
        .iter()
        .filter(|p| text.contains(p.as_str()))
        .cloned()
        .collect();

    if classified.is_conceptual {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        for pair in tokens.windows(2) {
            let (head, connector) = (pair[0], pair[1]);
            if TECHNICAL_CONNECTORS.contains(&connector)
                && head.chars().count() >= config.keyword_min_token_len
                && !TECHNICAL_CONNECTORS.contains(&head)
                && !config.stopwords.iter().any(|s| s == head)
            {
                found.insert(format!("{head} {connector}"));
            }
        }
    }

    found.len()
}

/// Whether any concept term or content-bearing query token lands in the
/// title.
fn title_matches(title: &str, classified: &ClassifiedQuery, config: &SearchConfig) -> bool {
    let title = classify::normalize(title);
    if classified
        .concept_terms
        .iter()
        .any(|term| title.contains(term.as_str()))
    {
        return true;
    }

    let title_tokens: BTreeSet<&str> = title.split_whitespace().collect();
    classify::keyword_tokens(&classified.normalized, config)
        .iter()
        .any(|t| title_tokens.contains(t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use test_fixtures::{doc, InMemoryStore};

    fn setup(query: &str) -> (SearchConfig, ClassifiedQuery) {
        let config = SearchConfig::default();
        let classified = classify(query, &config).unwrap();
        (config, classified)
    }

    #[test]
    fn technical_compound_penalizes_connector_bigram_under_conceptual_intent() {
        let (config, classified) = setup("What is caching?");
        let count = technical_compound_count(
            "cache invalidation launchpoint search",
            &classified,
            &config,
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn generated_phrase_and_bigram_count_once() {
        let (config, classified) = setup("What is caching?");
        // "caching search" is both a generated phrase and a bigram.
        let count = technical_compound_count("the caching search layer", &classified, &config);
        assert_eq!(count, 1);
    }

    #[test]
    fn no_bigram_penalty_without_conceptual_intent() {
        let (config, classified) = setup("how to configure redis cluster failover");
        assert!(!classified.is_conceptual);
        let count =
            technical_compound_count("redis launchpoint search notes", &classified, &config);
        assert_eq!(count, 0);
    }

    #[test]
    fn definitional_documents_outrank_technical_ones() {
        let (config, classified) = setup("What is caching?");
        let store = InMemoryStore::with_documents(vec![
            doc(
                "tech",
                "Caching Internals",
                "the caching api and caching tool surface",
            ),
            doc(
                "def",
                "Caching Explained",
                "an overview and introduction to the definition of caching",
            ),
        ]);

        let results = run(&store, &classified, None, 10, &BTreeSet::new(), &config).unwrap();
        assert_eq!(results[0].document.id, "def");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn claimed_documents_are_excluded() {
        let (config, classified) = setup("caching");
        let store = InMemoryStore::with_documents(vec![doc("d1", "Caching", "cache notes")]);

        let claimed: BTreeSet<String> = ["d1".to_string()].into_iter().collect();
        let results = run(&store, &classified, None, 10, &claimed, &config).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn ties_prefer_title_match_then_shorter_content() {
        let (config, classified) = setup("caching");
        let store = InMemoryStore::with_documents(vec![
            doc("b-long", "Notes", "caching caching notes stretched with padding text"),
            doc("a-short", "Notes", "caching caching notes"),
        ]);

        let results = run(&store, &classified, None, 10, &BTreeSet::new(), &config).unwrap();
        assert_eq!(results.len(), 2);
        // Equal scores: shorter content wins.
        assert_eq!(results[0].document.id, "a-short");
    }

    #[test]
    fn scores_never_drop_below_floor() {
        let (config, classified) = setup("What is caching?");
        let store = InMemoryStore::with_documents(vec![doc(
            "d1",
            "Notes",
            "caching search caching api caching tool caching function launchpoint search",
        )]);

        let results = run(&store, &classified, None, 10, &BTreeSet::new(), &config).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].score >= config.scoring.text_score_floor);
    }
}
