//! # corpus-core
//!
//! Foundation crate for the corpus search engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancelToken;
pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult, StoreError, StoreResult};
pub use models::{
    ClassifiedQuery, Document, MetadataFilter, RankedResultSet, ScoredResult, SearchDiagnostics,
    SearchMode, SearchRequest, SearchResponse, Stage,
};
pub use traits::{ICorpusStore, ISearch};
