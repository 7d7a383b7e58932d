use crate::errors::StoreResult;
use crate::models::{Document, MetadataFilter};

/// Capability contract for the corpus store adapter. The engine only
/// reads; ingestion and schema concerns belong to external collaborators.
///
/// Every method may fail with `StoreError::Unavailable` (connectivity) or
/// `StoreError::CapabilityMissing` (unsupported operation). A legitimate
/// empty result is `Ok(vec![])`, never an error. Implementations must
/// apply the metadata filter before returning candidates and must
/// tolerate concurrent ingestion writes; slight staleness is acceptable.
pub trait ICorpusStore: Send + Sync {
    /// Documents whose title equals the term exactly or near-exactly
    /// (case- and punctuation-insensitive).
    fn find_by_title_match(
        &self,
        term: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>>;

    /// Native text search over title + content, with the store's own
    /// relevance score per hit (higher = better). Implementations that
    /// cannot score return a non-positive score and the engine substitutes
    /// a uniform base.
    fn text_search(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        overfetch_limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>>;

    /// Documents containing any of the keywords, with the count of
    /// distinct keywords matched per document.
    fn keyword_search(
        &self,
        keywords: &[String],
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, usize)>>;

    /// Aggregation-style text match for semantic mode. Returns the store's
    /// aggregate text-match score; the engine layers its own signals on top.
    fn aggregate_semantic(
        &self,
        query: &str,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<(Document, f64)>>;

    /// Number of documents matching the filter.
    fn count(&self, filter: Option<&MetadataFilter>) -> StoreResult<usize>;

    /// Most recently ingested documents first. Backs the get-all and
    /// search-by-metadata operations.
    fn fetch_recent(
        &self,
        filter: Option<&MetadataFilter>,
        limit: usize,
    ) -> StoreResult<Vec<Document>>;
}
