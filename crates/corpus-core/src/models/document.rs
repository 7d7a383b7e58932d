use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exact-match metadata filter: every entry must match the document's
/// metadata verbatim. An empty filter matches every document.
pub type MetadataFilter = BTreeMap<String, String>;

/// A stored document. Immutable from the engine's point of view: the
/// search pipeline only ever reads documents, all mutation belongs to
/// the external ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned unique identifier.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Unordered string-keyed metadata. BTreeMap for deterministic
    /// serialization.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Origin reference (path, URL) recorded at ingestion.
    #[serde(default)]
    pub source: Option<String>,
    pub ingested_at: DateTime<Utc>,
}

impl Document {
    /// The single filter predicate shared by every store implementation.
    /// A document failing this is excluded before any stage scores it.
    pub fn matches_filter(&self, filter: Option<&MetadataFilter>) -> bool {
        match filter {
            None => true,
            Some(f) => f
                .iter()
                .all(|(key, value)| self.metadata.get(key) == Some(value)),
        }
    }
}
