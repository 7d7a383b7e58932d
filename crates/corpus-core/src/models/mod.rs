//! Request, document, and result models shared across the workspace.

mod diagnostics;
mod document;
mod query;
mod result;

pub use diagnostics::SearchDiagnostics;
pub use document::{Document, MetadataFilter};
pub use query::{ClassifiedQuery, SearchMode, SearchRequest};
pub use result::{RankedResultSet, ScoreContribution, ScoredResult, SearchHit, SearchResponse, Stage};
