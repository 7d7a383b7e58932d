//! Engine configuration: every scoring bonus/penalty lives in one
//! versioned structure instead of scattered magic numbers, so rankings
//! stay reproducible and tunable.

pub mod defaults;

use serde::{Deserialize, Serialize};

/// All additive scoring constants, staged and semantic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub conceptual_base: f64,
    pub conceptual_query_bonus: f64,
    pub text_uniform_base: f64,
    pub technical_phrase_penalty: f64,
    pub definitional_bonus: f64,
    pub title_match_bonus: f64,
    pub text_score_floor: f64,
    pub keyword_per_match: f64,
    pub keyword_score_ceiling: f64,
    pub semantic_title_bonus: f64,
    pub semantic_conceptual_title_bonus: f64,
    pub semantic_definitional_bonus: f64,
    pub semantic_technical_penalty: f64,
    pub length_band_min_chars: usize,
    pub length_band_max_chars: usize,
    pub length_band_bonus: f64,
    pub length_extreme_short_chars: usize,
    pub length_extreme_long_chars: usize,
    pub length_extreme_penalty: f64,
    pub recency_weight: f64,
    pub recency_half_life_days: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            conceptual_base: defaults::CONCEPTUAL_BASE,
            conceptual_query_bonus: defaults::CONCEPTUAL_QUERY_BONUS,
            text_uniform_base: defaults::TEXT_UNIFORM_BASE,
            technical_phrase_penalty: defaults::TECHNICAL_PHRASE_PENALTY,
            definitional_bonus: defaults::DEFINITIONAL_BONUS,
            title_match_bonus: defaults::TITLE_MATCH_BONUS,
            text_score_floor: defaults::TEXT_SCORE_FLOOR,
            keyword_per_match: defaults::KEYWORD_PER_MATCH,
            keyword_score_ceiling: defaults::KEYWORD_SCORE_CEILING,
            semantic_title_bonus: defaults::SEMANTIC_TITLE_BONUS,
            semantic_conceptual_title_bonus: defaults::SEMANTIC_CONCEPTUAL_TITLE_BONUS,
            semantic_definitional_bonus: defaults::SEMANTIC_DEFINITIONAL_BONUS,
            semantic_technical_penalty: defaults::SEMANTIC_TECHNICAL_PENALTY,
            length_band_min_chars: defaults::LENGTH_BAND_MIN_CHARS,
            length_band_max_chars: defaults::LENGTH_BAND_MAX_CHARS,
            length_band_bonus: defaults::LENGTH_BAND_BONUS,
            length_extreme_short_chars: defaults::LENGTH_EXTREME_SHORT_CHARS,
            length_extreme_long_chars: defaults::LENGTH_EXTREME_LONG_CHARS,
            length_extreme_penalty: defaults::LENGTH_EXTREME_PENALTY,
            recency_weight: defaults::RECENCY_WEIGHT,
            recency_half_life_days: defaults::RECENCY_HALF_LIFE_DAYS,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub overfetch_multiplier: usize,
    pub keyword_min_token_len: usize,
    /// Known technical compound phrases beyond the generated connector
    /// forms, e.g. corpus-specific jargon.
    pub technical_stoplist: Vec<String>,
    /// Stage 3 stopwords.
    pub stopwords: Vec<String>,
    pub scoring: ScoringWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_LIMIT,
            max_limit: defaults::MAX_LIMIT,
            overfetch_multiplier: defaults::OVERFETCH_MULTIPLIER,
            keyword_min_token_len: defaults::KEYWORD_MIN_TOKEN_LEN,
            technical_stoplist: Vec::new(),
            stopwords: defaults::STOPWORDS.iter().map(|s| s.to_string()).collect(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a TOML override file. Missing fields keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
