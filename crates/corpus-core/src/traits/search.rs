use crate::errors::SearchResult;
use crate::models::{RankedResultSet, SearchRequest};

/// The narrow query interface external collaborators (HTTP layer, tool
/// invocation) call into.
pub trait ISearch {
    fn search(&self, request: &SearchRequest) -> SearchResult<RankedResultSet>;
}
