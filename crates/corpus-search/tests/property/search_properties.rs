//! Property suite: ranking invariants that must hold for any corpus and
//! any query.

use std::collections::BTreeSet;

use proptest::prelude::*;

use corpus_core::config::SearchConfig;
use corpus_core::models::{Document, MetadataFilter, SearchMode, SearchRequest};
use corpus_core::traits::ISearch;
use corpus_search::SearchEngine;
use test_fixtures::{doc_aged, with_metadata, InMemoryStore};

const WORDS: &[&str] = &[
    "cache", "caching", "search", "index", "overview", "introduction", "zebra", "storage",
    "eviction", "policy", "latency", "queue",
];

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(WORDS)
}

fn corpus() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(
        (
            prop::collection::vec(word(), 1..3),
            prop::collection::vec(word(), 1..12),
            0i64..400,
            prop::sample::select(&["core", "infra"][..]),
        ),
        0..12,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (title, content, age, team))| {
                with_metadata(
                    doc_aged(
                        &format!("doc-{i:03}"),
                        &title.join(" "),
                        &content.join(" "),
                        age,
                    ),
                    &[("team", team)],
                )
            })
            .collect()
    })
}

fn query() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..4).prop_map(|w| w.join(" "))
}

fn mode() -> impl Strategy<Value = SearchMode> {
    prop_oneof![Just(SearchMode::Staged), Just(SearchMode::Semantic)]
}

proptest! {
    #[test]
    fn scores_are_monotonically_non_increasing(
        docs in corpus(),
        q in query(),
        limit in 1usize..20,
        m in mode(),
    ) {
        let store = InMemoryStore::with_documents(docs);
        let engine = SearchEngine::new(&store, SearchConfig::default());
        let set = engine
            .search(&SearchRequest::new(q).with_limit(limit).with_mode(m))
            .unwrap();

        for pair in set.results.windows(2) {
            prop_assert!(
                pair[0].score >= pair[1].score,
                "{} < {}",
                pair[0].score,
                pair[1].score
            );
        }
    }

    #[test]
    fn no_document_id_appears_twice(
        docs in corpus(),
        q in query(),
        limit in 1usize..20,
        m in mode(),
    ) {
        let store = InMemoryStore::with_documents(docs);
        let engine = SearchEngine::new(&store, SearchConfig::default());
        let set = engine
            .search(&SearchRequest::new(q).with_limit(limit).with_mode(m))
            .unwrap();

        let ids: BTreeSet<&str> = set.results.iter().map(|r| r.document.id.as_str()).collect();
        prop_assert_eq!(ids.len(), set.results.len());
    }

    #[test]
    fn repeated_searches_are_idempotent(
        docs in corpus(),
        q in query(),
        limit in 1usize..20,
    ) {
        let store = InMemoryStore::with_documents(docs);
        let engine = SearchEngine::new(&store, SearchConfig::default());
        let request = SearchRequest::new(q).with_limit(limit);

        let first = engine.search(&request).unwrap();
        let second = engine.search(&request).unwrap();

        let shape = |set: &corpus_core::models::RankedResultSet| {
            set.results
                .iter()
                .map(|r| (r.document.id.clone(), r.score))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(shape(&first), shape(&second));
        prop_assert_eq!(first.total_candidates, second.total_candidates);
    }

    #[test]
    fn metadata_filter_is_exclusive(
        docs in corpus(),
        q in query(),
        limit in 1usize..20,
        m in mode(),
    ) {
        let store = InMemoryStore::with_documents(docs);
        let engine = SearchEngine::new(&store, SearchConfig::default());

        let mut filter = MetadataFilter::new();
        filter.insert("team".to_string(), "core".to_string());

        let set = engine
            .search(
                &SearchRequest::new(q)
                    .with_limit(limit)
                    .with_filter(filter)
                    .with_mode(m),
            )
            .unwrap();

        for r in &set.results {
            prop_assert_eq!(
                r.document.metadata.get("team").map(String::as_str),
                Some("core")
            );
        }
    }

    #[test]
    fn result_count_respects_the_limit(
        docs in corpus(),
        q in query(),
        limit in 1usize..20,
        m in mode(),
    ) {
        let store = InMemoryStore::with_documents(docs);
        let engine = SearchEngine::new(&store, SearchConfig::default());
        let set = engine
            .search(&SearchRequest::new(q).with_limit(limit).with_mode(m))
            .unwrap();

        prop_assert!(set.results.len() <= limit);
        prop_assert!(set.total_candidates >= set.results.len());
        prop_assert_eq!(set.limit_applied, limit);
    }
}
