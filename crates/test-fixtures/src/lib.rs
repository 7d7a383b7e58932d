//! Store doubles for engine tests: a deterministic in-memory corpus
//! store, a call-counting wrapper, and a fault-injecting wrapper.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Duration, TimeZone, Utc};

use corpus_core::errors::{StoreError, StoreResult};
use corpus_core::models::{Document, MetadataFilter};
use corpus_core::traits::ICorpusStore;

// ---------------------------------------------------------------------------
// Document builders
// ---------------------------------------------------------------------------

/// Fixed reference instant so fixture corpora are identical across runs.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Build a document ingested at the fixed reference instant.
pub fn doc(id: &str, title: &str, content: &str) -> Document {
    doc_aged(id, title, content, 0)
}

/// Build a document ingested `days_ago` days before the reference instant.
pub fn doc_aged(id: &str, title: &str, content: &str, days_ago: i64) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        metadata: Default::default(),
        source: None,
        ingested_at: base_time() - Duration::days(days_ago),
    }
}

/// Attach metadata entries to a document.
pub fn with_metadata(mut document: Document, entries: &[(&str, &str)]) -> Document {
    for (key, value) in entries {
        document
            .metadata
            .insert(key.to_string(), value.to_string());
    }
    document
}

/// A random id for tests that only need uniqueness.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// InMemoryStore
// ---------------------------------------------------------------------------

/// Deterministic `ICorpusStore` over a plain vector. All capabilities
/// apply the metadata filter before scoring and break ties by id, so the
/// same corpus and query always produce the same ordering.
#[derive(Default)]
pub struct InMemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(docs: Vec<Document>) -> Self {
        Self {
            docs: RwLock::new(docs),
        }
    }

    /// Ingest one document. The engine tolerates writes between stages.
    pub fn insert(&self, document: Document) {
        self.docs.write().unwrap().push(document);
    }

    fn filtered(&self, filter: Option<&MetadataFilter>) -> Vec<Document> {
        self.docs
            .read()
            .unwrap()
            .iter()
            .filter(|d| d.matches_filter(filter))
            .cloned()
            .collect()
    }
}

/// Lowercase and strip punctuation so "Caching!" and "caching" compare
/// equal.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokens(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

impl ICorpusStore for InMemoryStore {
    fn find_by_title_match(
        &self,
        term: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        let wanted = normalize(term);
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        let definitional = format!("what is {wanted}");

        let mut hits: Vec<Document> = self
            .filtered(filter)
            .into_iter()
            .filter(|d| {
                let title = normalize(&d.title);
                title == wanted || title == definitional
            })
            .collect();
        hits.sort_by(|a, b| a.id.cmp(&b.id));
        hits.truncate(limit);
        Ok(hits)
    }

    fn text_search(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        overfetch_limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>> {
        let query_tokens = tokens(query);
        if query_tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<(Document, f64)> = self
            .filtered(filter)
            .into_iter()
            .filter_map(|d| {
                let title_tokens = tokens(&d.title);
                let content_tokens = tokens(&d.content);
                // Title hits weigh double: crude stand-in for a native
                // relevance score.
                let score: f64 = query_tokens
                    .iter()
                    .map(|t| {
                        let mut s = 0.0;
                        if title_tokens.contains(t) {
                            s += 2.0;
                        }
                        if content_tokens.contains(t) {
                            s += 1.0;
                        }
                        s
                    })
                    .sum();
                (score > 0.0).then_some((d, score))
            })
            .collect();

        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        hits.truncate(overfetch_limit);
        Ok(hits)
    }

    fn keyword_search(
        &self,
        keywords: &[String],
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, usize)>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<(Document, usize)> = self
            .filtered(filter)
            .into_iter()
            .filter_map(|d| {
                let haystack = normalize(&format!("{} {}", d.title, d.content));
                let matched = keywords
                    .iter()
                    .filter(|k| haystack.contains(normalize(k).as_str()))
                    .count();
                (matched > 0).then_some((d, matched))
            })
            .collect();

        hits.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));
        hits.truncate(limit);
        Ok(hits)
    }

    fn aggregate_semantic(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>> {
        // Same token-overlap base as text search; the engine layers its
        // aggregate signals on top.
        self.text_search(query, filter, limit)
    }

    fn count(&self, filter: Option<&MetadataFilter>) -> StoreResult<usize> {
        Ok(self.filtered(filter).len())
    }

    fn fetch_recent(
        &self,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        let mut docs = self.filtered(filter);
        docs.sort_by(|a, b| b.ingested_at.cmp(&a.ingested_at).then_with(|| a.id.cmp(&b.id)));
        docs.truncate(limit);
        Ok(docs)
    }
}

// ---------------------------------------------------------------------------
// CountingStore
// ---------------------------------------------------------------------------

/// Per-capability call counts observed by a `CountingStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallCounts {
    pub title_match: usize,
    pub text_search: usize,
    pub keyword_search: usize,
    pub aggregate_semantic: usize,
    pub count: usize,
    pub fetch_recent: usize,
}

/// Wraps a store and counts calls per capability. Backs the
/// fallback-trigger invariant tests.
pub struct CountingStore<S> {
    inner: S,
    title_match: AtomicUsize,
    text_search: AtomicUsize,
    keyword_search: AtomicUsize,
    aggregate_semantic: AtomicUsize,
    count: AtomicUsize,
    fetch_recent: AtomicUsize,
}

impl<S: ICorpusStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            title_match: AtomicUsize::new(0),
            text_search: AtomicUsize::new(0),
            keyword_search: AtomicUsize::new(0),
            aggregate_semantic: AtomicUsize::new(0),
            count: AtomicUsize::new(0),
            fetch_recent: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> CallCounts {
        CallCounts {
            title_match: self.title_match.load(Ordering::SeqCst),
            text_search: self.text_search.load(Ordering::SeqCst),
            keyword_search: self.keyword_search.load(Ordering::SeqCst),
            aggregate_semantic: self.aggregate_semantic.load(Ordering::SeqCst),
            count: self.count.load(Ordering::SeqCst),
            fetch_recent: self.fetch_recent.load(Ordering::SeqCst),
        }
    }
}

impl<S: ICorpusStore> ICorpusStore for CountingStore<S> {
    fn find_by_title_match(
        &self,
        term: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        self.title_match.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_title_match(term, filter, limit)
    }

    fn text_search(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        overfetch_limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>> {
        self.text_search.fetch_add(1, Ordering::SeqCst);
        self.inner.text_search(query, filter, overfetch_limit)
    }

    fn keyword_search(
        &self,
        keywords: &[String],
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, usize)>> {
        self.keyword_search.fetch_add(1, Ordering::SeqCst);
        self.inner.keyword_search(keywords, filter, limit)
    }

    fn aggregate_semantic(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>> {
        self.aggregate_semantic.fetch_add(1, Ordering::SeqCst);
        self.inner.aggregate_semantic(query, filter, limit)
    }

    fn count(&self, filter: Option<&MetadataFilter>) -> StoreResult<usize> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.count(filter)
    }

    fn fetch_recent(
        &self,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        self.fetch_recent.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_recent(filter, limit)
    }
}

// ---------------------------------------------------------------------------
// FailingStore
// ---------------------------------------------------------------------------

/// A single store capability, for fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    TitleMatch,
    TextSearch,
    KeywordSearch,
    AggregateSemantic,
    Count,
    FetchRecent,
}

enum FailKind {
    Unavailable,
    CapabilityMissing,
}

/// Fails exactly one capability, delegating everything else. Backs the
/// mid-pipeline fault scenarios.
pub struct FailingStore<S> {
    inner: S,
    capability: Capability,
    kind: FailKind,
}

impl<S: ICorpusStore> FailingStore<S> {
    /// Fail the capability with a connectivity fault.
    pub fn unavailable(inner: S, capability: Capability) -> Self {
        Self {
            inner,
            capability,
            kind: FailKind::Unavailable,
        }
    }

    /// Fail the capability as unsupported by the store.
    pub fn capability_missing(inner: S, capability: Capability) -> Self {
        Self {
            inner,
            capability,
            kind: FailKind::CapabilityMissing,
        }
    }

    fn fail_if(&self, capability: Capability, name: &str) -> StoreResult<()> {
        if self.capability != capability {
            return Ok(());
        }
        Err(match self.kind {
            FailKind::Unavailable => StoreError::unavailable(format!("{name}: injected fault")),
            FailKind::CapabilityMissing => StoreError::capability_missing(name),
        })
    }
}

impl<S: ICorpusStore> ICorpusStore for FailingStore<S> {
    fn find_by_title_match(
        &self,
        term: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        self.fail_if(Capability::TitleMatch, "find_by_title_match")?;
        self.inner.find_by_title_match(term, filter, limit)
    }

    fn text_search(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        overfetch_limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>> {
        self.fail_if(Capability::TextSearch, "text_search")?;
        self.inner.text_search(query, filter, overfetch_limit)
    }

    fn keyword_search(
        &self,
        keywords: &[String],
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, usize)>> {
        self.fail_if(Capability::KeywordSearch, "keyword_search")?;
        self.inner.keyword_search(keywords, filter, limit)
    }

    fn aggregate_semantic(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>> {
        self.fail_if(Capability::AggregateSemantic, "aggregate_semantic")?;
        self.inner.aggregate_semantic(query, filter, limit)
    }

    fn count(&self, filter: Option<&MetadataFilter>) -> StoreResult<usize> {
        self.fail_if(Capability::Count, "count")?;
        self.inner.count(filter)
    }

    fn fetch_recent(
        &self,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        self.fail_if(Capability::FetchRecent, "fetch_recent")?;
        self.inner.fetch_recent(filter, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_match_is_punctuation_insensitive() {
        let store = InMemoryStore::with_documents(vec![doc("d1", "Caching!", "body")]);
        let hits = store.find_by_title_match("caching", None, 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "d1");
    }

    #[test]
    fn title_match_accepts_definitional_form() {
        let store = InMemoryStore::with_documents(vec![doc("d1", "What is Caching", "body")]);
        let hits = store.find_by_title_match("caching", None, 10).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn text_search_ranks_title_hits_above_content_hits() {
        let store = InMemoryStore::with_documents(vec![
            doc("a", "Caching", "unrelated"),
            doc("b", "Other", "caching mentioned in body"),
        ]);
        let hits = store.text_search("caching", None, 10).unwrap();
        assert_eq!(hits[0].0.id, "a");
        assert!(hits[0].1 > hits[1].1);
    }

    #[test]
    fn metadata_filter_applies_before_matching() {
        let tagged = with_metadata(doc("a", "Caching", "body"), &[("lang", "en")]);
        let store = InMemoryStore::with_documents(vec![tagged, doc("b", "Caching", "body")]);

        let mut filter = MetadataFilter::new();
        filter.insert("lang".to_string(), "en".to_string());

        let hits = store.find_by_title_match("caching", Some(&filter), 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn failing_store_only_fails_selected_capability() {
        let inner = InMemoryStore::with_documents(vec![doc("a", "Caching", "body")]);
        let store = FailingStore::unavailable(inner, Capability::TextSearch);

        assert!(store.text_search("caching", None, 10).is_err());
        assert!(store.find_by_title_match("caching", None, 10).is_ok());
        assert_eq!(store.count(None).unwrap(), 1);
    }

    #[test]
    fn counting_store_tracks_per_capability() {
        let store = CountingStore::new(InMemoryStore::new());
        store.count(None).unwrap();
        store.count(None).unwrap();
        store.text_search("q", None, 5).unwrap();

        let calls = store.calls();
        assert_eq!(calls.count, 2);
        assert_eq!(calls.text_search, 1);
        assert_eq!(calls.keyword_search, 0);
    }

    #[test]
    fn fetch_recent_orders_newest_first() {
        let store = InMemoryStore::with_documents(vec![
            doc_aged("old", "Old", "body", 10),
            doc_aged("new", "New", "body", 1),
        ]);
        let docs = store.fetch_recent(None, 10).unwrap();
        assert_eq!(docs[0].id, "new");
        assert_eq!(docs[1].id, "old");
    }
}
