//! Error taxonomy for the search engine.
//!
//! Four terminal conditions: `InvalidQuery` (caller-fixable, rejected before
//! any store call), store `Unavailable` / `CapabilityMissing` (propagated
//! unchanged from the adapter), and `Canceled` (caller-initiated abort).
//! A stage finding zero matches is not an error.

mod store_error;

pub use store_error::StoreError;

/// Result alias for store adapter calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified engine error.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Empty query or non-positive limit. Rejected before any store call.
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Store-level failure. Aborts the whole pipeline; no partial ranking
    /// is ever surfaced as a degraded "no results" response.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller aborted the request mid-flight.
    #[error("search canceled by caller")]
    Canceled,
}

impl SearchError {
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Whether the condition is transient and worth a caller-side retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(StoreError::Unavailable { .. }))
    }
}

/// Result alias used throughout the engine.
pub type SearchResult<T> = Result<T, SearchError>;
