//! # corpus-search
//!
//! The relevance engine: classifies a query, runs the staged fallback
//! pipeline (conceptual match → scored text search → keyword fallback)
//! or the single-pass semantic aggregation, and merges into a final
//! deterministic ranking.

pub mod classify;
pub mod engine;
pub mod ranking;
pub mod semantic;
pub mod stages;

pub use engine::SearchEngine;
