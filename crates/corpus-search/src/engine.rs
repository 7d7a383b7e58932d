//! SearchEngine: implements ISearch, orchestrates the staged pipeline.
//!
//! Staged mode: classify → conceptual titles → scored text search →
//! keyword fallback → merge. Semantic mode: one aggregate pass. Stages
//! run sequentially because each depends on the exclusion set of the
//! previous one; a store failure aborts the whole request.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info};

use corpus_core::cancel::CancelToken;
use corpus_core::config::SearchConfig;
use corpus_core::errors::{SearchError, SearchResult};
use corpus_core::models::{
    ClassifiedQuery, Document, MetadataFilter, RankedResultSet, ScoredResult, SearchDiagnostics,
    SearchMode, SearchRequest,
};
use corpus_core::traits::{ICorpusStore, ISearch};

use crate::classify;
use crate::ranking;
use crate::semantic;
use crate::stages;

/// The engine holds no request-scoped state: every call threads its own
/// query structures and discards them with the response.
pub struct SearchEngine<'a> {
    store: &'a dyn ICorpusStore,
    config: SearchConfig,
    cancel: Option<CancelToken>,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a dyn ICorpusStore, config: SearchConfig) -> Self {
        Self {
            store,
            config,
            cancel: None,
        }
    }

    /// Attach a cancellation token. The engine checks it before every
    /// store round-trip; once fired the request fails with `Canceled`
    /// and no partial ranking is returned.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run a search and also return the classification decision and
    /// per-stage counts for operational debugging.
    pub fn search_with_diagnostics(
        &self,
        request: &SearchRequest,
    ) -> SearchResult<(RankedResultSet, SearchDiagnostics)> {
        let limit = self.effective_limit(request.limit)?;
        // Classification is the only validation that touches the query;
        // it runs before any store call.
        let classified = classify::classify(&request.query, &self.config)?;
        debug!(
            query = %classified.normalized,
            is_conceptual = classified.is_conceptual,
            mode = ?request.mode,
            limit,
            "classified query"
        );

        let filter = request.metadata_filter.as_ref();
        let mut diagnostics = SearchDiagnostics::for_mode(request.mode);
        diagnostics.is_conceptual = classified.is_conceptual;
        diagnostics.concept_terms = classified.concept_terms.clone();
        diagnostics.technical_phrases = classified.technical_phrases.clone();

        let set = match request.mode {
            SearchMode::Staged => self.staged(&classified, filter, limit, &mut diagnostics)?,
            SearchMode::Semantic => {
                self.ensure_live()?;
                let set =
                    semantic::run(self.store, &classified, filter, limit, Utc::now(), &self.config)?;
                diagnostics.semantic_count = set.total_candidates;
                set
            }
        };

        info!(
            results = set.results.len(),
            total_candidates = set.total_candidates,
            "search complete"
        );

        Ok((set, diagnostics))
    }

    fn staged(
        &self,
        classified: &ClassifiedQuery,
        filter: Option<&MetadataFilter>,
        limit: usize,
        diagnostics: &mut SearchDiagnostics,
    ) -> SearchResult<RankedResultSet> {
        self.ensure_live()?;
        let conceptual =
            stages::conceptual::run(self.store, classified, filter, limit, &self.config.scoring)?;
        diagnostics.conceptual_count = conceptual.len();
        debug!(count = conceptual.len(), "stage 1 (conceptual) complete");

        let mut claimed: BTreeSet<String> =
            conceptual.iter().map(|r| r.document.id.clone()).collect();

        // Coverage short-circuit: later stages only run while the
        // combined yield is under the limit.
        let text: Vec<ScoredResult> = if conceptual.len() < limit {
            self.ensure_live()?;
            let text =
                stages::text::run(self.store, classified, filter, limit, &claimed, &self.config)?;
            diagnostics.text_count = text.len();
            debug!(count = text.len(), "stage 2 (text) complete");
            text
        } else {
            Vec::new()
        };
        claimed.extend(text.iter().map(|r| r.document.id.clone()));

        let keyword: Vec<ScoredResult> = if conceptual.len() + text.len() < limit {
            self.ensure_live()?;
            let keyword = stages::keyword::run(
                self.store,
                classified,
                filter,
                limit,
                &claimed,
                &self.config,
            )?;
            diagnostics.keyword_count = keyword.len();
            debug!(count = keyword.len(), "stage 3 (keyword fallback) complete");
            keyword
        } else {
            Vec::new()
        };

        Ok(ranking::merge(vec![conceptual, text, keyword], limit))
    }

    /// Most recently ingested documents, newest first.
    pub fn fetch_all(&self, limit: usize) -> SearchResult<Vec<Document>> {
        let limit = self.effective_limit(limit)?;
        self.ensure_live()?;
        Ok(self.store.fetch_recent(None, limit)?)
    }

    /// Documents matching a metadata filter exactly, newest first.
    pub fn search_by_metadata(
        &self,
        filter: &MetadataFilter,
        limit: usize,
    ) -> SearchResult<Vec<Document>> {
        let limit = self.effective_limit(limit)?;
        self.ensure_live()?;
        Ok(self.store.fetch_recent(Some(filter), limit)?)
    }

    /// Corpus size under an optional filter.
    pub fn count(&self, filter: Option<&MetadataFilter>) -> SearchResult<usize> {
        self.ensure_live()?;
        Ok(self.store.count(filter)?)
    }

    fn effective_limit(&self, requested: usize) -> SearchResult<usize> {
        if requested == 0 {
            return Err(SearchError::invalid_query("limit must be positive"));
        }
        Ok(requested.min(self.config.max_limit))
    }

    fn ensure_live(&self) -> SearchResult<()> {
        match &self.cancel {
            Some(token) if token.is_canceled() => Err(SearchError::Canceled),
            _ => Ok(()),
        }
    }
}

impl<'a> ISearch for SearchEngine<'a> {
    fn search(&self, request: &SearchRequest) -> SearchResult<RankedResultSet> {
        self.search_with_diagnostics(request).map(|(set, _)| set)
    }
}
