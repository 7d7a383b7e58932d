//! Named defaults for every tunable. Scoring constants are calibrated so
//! the three stage bands never overlap: conceptual matches start at 100,
//! re-scored text results stay in low single digits, and the keyword
//! fallback is capped well under both.

/// Default result limit when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 10;

/// Hard ceiling on the requested limit; larger requests are clamped.
pub const MAX_LIMIT: usize = 100;

/// Stage 2 over-fetches this multiple of the limit so re-ranking has a
/// superset to work with.
pub const OVERFETCH_MULTIPLIER: usize = 3;

/// Base score for an exact/near-exact title match (stage 1).
pub const CONCEPTUAL_BASE: f64 = 100.0;

/// Added on top of the conceptual base when the query itself carries
/// definitional phrasing.
pub const CONCEPTUAL_QUERY_BONUS: f64 = 5.0;

/// Stage 2 base when the store reports no usable native score.
pub const TEXT_UNIFORM_BASE: f64 = 1.0;

/// Deducted once per detected technical compound phrase.
pub const TECHNICAL_PHRASE_PENALTY: f64 = 0.3;

/// Added once per definitional indicator found in the document.
pub const DEFINITIONAL_BONUS: f64 = 0.2;

/// Added when the match lands in the title rather than body only.
/// Deliberately smaller than the definitional bonus.
pub const TITLE_MATCH_BONUS: f64 = 0.15;

/// Stage 2 adjusted scores never go below this (additive scoring,
/// floored).
pub const TEXT_SCORE_FLOOR: f64 = 0.0;

/// Stage 3 score per distinct matched keyword.
pub const KEYWORD_PER_MATCH: f64 = 0.1;

/// Stage 3 scores are capped here so the fallback can never outrank the
/// conceptual band.
pub const KEYWORD_SCORE_CEILING: f64 = 0.3;

/// Stage 3 ignores tokens shorter than this.
pub const KEYWORD_MIN_TOKEN_LEN: usize = 3;

/// Semantic mode: added when the query appears in the title.
pub const SEMANTIC_TITLE_BONUS: f64 = 5.0;

/// Semantic mode: added when the title is a definitional form of the
/// query ("what is <query>").
pub const SEMANTIC_CONCEPTUAL_TITLE_BONUS: f64 = 8.0;

/// Semantic mode: added once per definitional indicator in the content.
pub const SEMANTIC_DEFINITIONAL_BONUS: f64 = 3.0;

/// Semantic mode: deducted per technical compound phrase.
pub const SEMANTIC_TECHNICAL_PENALTY: f64 = 2.0;

/// Semantic mode length band: documents inside the band earn the bonus.
pub const LENGTH_BAND_MIN_CHARS: usize = 200;
pub const LENGTH_BAND_MAX_CHARS: usize = 1000;
pub const LENGTH_BAND_BONUS: f64 = 2.0;

/// Semantic mode: documents outside these extremes are penalized.
pub const LENGTH_EXTREME_SHORT_CHARS: usize = 50;
pub const LENGTH_EXTREME_LONG_CHARS: usize = 10_000;
pub const LENGTH_EXTREME_PENALTY: f64 = 1.0;

/// Semantic mode recency: weight of the decaying freshness bonus and its
/// half-life in days.
pub const RECENCY_WEIGHT: f64 = 1.0;
pub const RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

/// Stage 3 stopwords, kept deliberately small: query connectives that
/// carry no retrieval signal.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "what", "how", "why", "who", "that", "this", "with",
    "from", "into", "about", "does", "can", "you",
];
