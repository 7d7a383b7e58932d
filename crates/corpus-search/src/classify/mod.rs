//! Query classification: conceptual ("what is X", standalone concept)
//! versus technical/compound-phrase intent.

use std::collections::BTreeSet;

use corpus_core::config::SearchConfig;
use corpus_core::constants::{CONCEPTUAL_PREFIXES, TECHNICAL_CONNECTORS};
use corpus_core::errors::{SearchError, SearchResult};
use corpus_core::models::ClassifiedQuery;

/// Standalone queries longer than this are treated as compound phrases,
/// not single noun-phrase concepts.
const MAX_STANDALONE_WORDS: usize = 2;

/// Classify a raw query. The only failure is an empty/whitespace query.
pub fn classify(raw: &str, config: &SearchConfig) -> SearchResult<ClassifiedQuery> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SearchError::invalid_query("empty query"));
    }

    let normalized = normalize(trimmed);
    if normalized.is_empty() {
        return Err(SearchError::invalid_query("query has no searchable text"));
    }

    let mut is_conceptual = false;
    let mut concept_terms = BTreeSet::new();

    for prefix in CONCEPTUAL_PREFIXES {
        if let Some(rest) = normalized.strip_prefix(prefix) {
            let term = rest.trim();
            if !term.is_empty() {
                is_conceptual = true;
                concept_terms.insert(term.to_string());
            }
            break;
        }
    }

    // A short standalone noun phrase with no technical compound is also
    // conceptual ("caching", "event sourcing").
    if !is_conceptual
        && normalized.split_whitespace().count() <= MAX_STANDALONE_WORDS
        && !has_technical_compound(trimmed, &normalized, config)
    {
        is_conceptual = true;
        concept_terms.insert(normalized.clone());
    }

    let technical_phrases = technical_phrases(&normalized, &concept_terms, config);

    Ok(ClassifiedQuery {
        raw: raw.to_string(),
        normalized,
        is_conceptual,
        concept_terms,
        technical_phrases,
    })
}

/// Lowercase and fold punctuation to whitespace, keeping hyphens so
/// compound terms stay detectable.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stage 3 keywords: normalized tokens, stopword-filtered, first
/// occurrence kept in query order.
pub fn keyword_tokens(normalized: &str, config: &SearchConfig) -> Vec<String> {
    let mut seen = BTreeSet::new();
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= config.keyword_min_token_len)
        .filter(|t| !config.stopwords.iter().any(|s| s == t))
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

/// Compound phrases to penalize in documents: connector forms generated
/// from the query's concept terms ("caching search", "using caching"),
/// plus stoplist phrases sharing a token with the query.
fn technical_phrases(
    normalized: &str,
    concept_terms: &BTreeSet<String>,
    config: &SearchConfig,
) -> BTreeSet<String> {
    let mut phrases = BTreeSet::new();

    let mut stems: BTreeSet<&str> = concept_terms.iter().map(String::as_str).collect();
    stems.insert(normalized);

    for stem in stems {
        for connector in TECHNICAL_CONNECTORS {
            phrases.insert(format!("{stem} {connector}"));
        }
        phrases.insert(format!("search {stem}"));
        phrases.insert(format!("using {stem}"));
    }

    let query_tokens: BTreeSet<&str> = normalized.split_whitespace().collect();
    for phrase in &config.technical_stoplist {
        let lowered = phrase.to_lowercase();
        if lowered.split_whitespace().any(|t| query_tokens.contains(t)) {
            phrases.insert(lowered);
        }
    }

    phrases
}

/// Whether the query itself contains a multi-word technical compound:
/// hyphenated or camel-case tokens, or a known stoplist phrase.
fn has_technical_compound(raw: &str, normalized: &str, config: &SearchConfig) -> bool {
    for token in raw.split_whitespace() {
        let inner = token.trim_matches(|c: char| !c.is_alphanumeric());
        if inner.contains('-') {
            return true;
        }
        // camelCase: a lowercase letter directly followed by uppercase.
        let mut prev_lower = false;
        for c in inner.chars() {
            if c.is_uppercase() && prev_lower {
                return true;
            }
            prev_lower = c.is_lowercase();
        }
    }

    config
        .technical_stoplist
        .iter()
        .any(|phrase| normalized.contains(&phrase.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(classify("", &config()).is_err());
        assert!(classify("   \t ", &config()).is_err());
    }

    #[test]
    fn what_is_prefix_is_conceptual() {
        let c = classify("What is caching?", &config()).unwrap();
        assert!(c.is_conceptual);
        assert!(c.concept_terms.contains("caching"));
        assert_eq!(c.normalized, "what is caching");
    }

    #[test]
    fn define_prefix_is_conceptual() {
        let c = classify("define event sourcing", &config()).unwrap();
        assert!(c.is_conceptual);
        assert!(c.concept_terms.contains("event sourcing"));
    }

    #[test]
    fn short_standalone_term_is_conceptual() {
        let c = classify("caching", &config()).unwrap();
        assert!(c.is_conceptual);
        assert!(c.concept_terms.contains("caching"));
    }

    #[test]
    fn hyphenated_compound_is_not_conceptual() {
        let c = classify("write-ahead logging", &config()).unwrap();
        assert!(!c.is_conceptual);
        assert!(c.concept_terms.is_empty());
    }

    #[test]
    fn camel_case_token_is_not_conceptual() {
        let c = classify("HashMap internals", &config()).unwrap();
        assert!(!c.is_conceptual);
    }

    #[test]
    fn long_query_is_not_standalone_conceptual() {
        let c = classify("how to configure redis cluster failover", &config()).unwrap();
        assert!(!c.is_conceptual);
    }

    #[test]
    fn stoplist_phrase_blocks_conceptual_and_is_detected() {
        let mut cfg = config();
        cfg.technical_stoplist.push("vector search".to_string());

        let c = classify("vector search", &cfg).unwrap();
        assert!(!c.is_conceptual);
        assert!(c.technical_phrases.contains("vector search"));
    }

    #[test]
    fn connector_phrases_are_generated_from_concept_terms() {
        let c = classify("caching", &config()).unwrap();
        assert!(c.technical_phrases.contains("caching search"));
        assert!(c.technical_phrases.contains("caching api"));
        assert!(c.technical_phrases.contains("using caching"));
    }

    #[test]
    fn keyword_tokens_filter_stopwords_and_short_tokens() {
        let cfg = config();
        let tokens = keyword_tokens("what is a caching layer", &cfg);
        assert_eq!(tokens, vec!["caching".to_string(), "layer".to_string()]);
    }

    #[test]
    fn keyword_tokens_deduplicate_preserving_order() {
        let cfg = config();
        let tokens = keyword_tokens("cache layer cache", &cfg);
        assert_eq!(tokens, vec!["cache".to_string(), "layer".to_string()]);
    }
}
