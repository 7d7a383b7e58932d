//! Result merging: stage priority order, first-wins dedup, monotonic
//! clamp, truncation.

use std::collections::BTreeSet;

use corpus_core::models::{RankedResultSet, ScoredResult};

/// Merge per-stage result lists (already sorted within each stage) into
/// the final ranking.
///
/// Concatenates in stage priority order, keeps the first occurrence of
/// each document id, clamps scores to the running minimum so the set is
/// monotonically non-increasing across stage boundaries, and truncates
/// to the limit. Pure function, no I/O.
pub fn merge(stage_lists: Vec<Vec<ScoredResult>>, limit: usize) -> RankedResultSet {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut merged: Vec<ScoredResult> = Vec::new();

    for list in stage_lists {
        for result in list {
            if seen.insert(result.document.id.clone()) {
                merged.push(result);
            }
        }
    }

    // A later stage's top score may exceed an earlier stage's tail.
    // Stage priority outranks raw score, so clamp; the raw contributions
    // stay intact for diagnostics.
    let mut floor = f64::INFINITY;
    for result in &mut merged {
        if result.score > floor {
            result.score = floor;
        } else {
            floor = result.score;
        }
    }

    let total_candidates = merged.len();
    merged.truncate(limit);

    RankedResultSet {
        results: merged,
        total_candidates,
        limit_applied: limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_core::models::{ScoreContribution, Stage};
    use test_fixtures::doc;

    fn scored(id: &str, score: f64, stage: Stage) -> ScoredResult {
        ScoredResult {
            document: doc(id, id, "body"),
            score,
            stage,
            contributions: vec![ScoreContribution::new("base", score)],
        }
    }

    #[test]
    fn first_stage_wins_on_duplicate_ids() {
        let set = merge(
            vec![
                vec![scored("d1", 105.0, Stage::Conceptual)],
                vec![scored("d1", 2.0, Stage::Text), scored("d2", 1.5, Stage::Text)],
            ],
            10,
        );

        assert_eq!(set.results.len(), 2);
        assert_eq!(set.results[0].document.id, "d1");
        assert_eq!(set.results[0].stage, Stage::Conceptual);
        assert_eq!(set.results[0].score, 105.0);
    }

    #[test]
    fn cross_stage_scores_are_clamped_monotonic() {
        let set = merge(
            vec![
                vec![scored("d1", 0.1, Stage::Text)],
                vec![scored("d2", 0.3, Stage::Keyword)],
            ],
            10,
        );

        assert_eq!(set.results[0].score, 0.1);
        // Keyword result keeps its position but cannot outrank stage 2.
        assert_eq!(set.results[1].score, 0.1);
        assert_eq!(set.results[1].contributions[0].amount, 0.3);
    }

    #[test]
    fn total_candidates_counts_before_truncation() {
        let set = merge(
            vec![vec![
                scored("a", 3.0, Stage::Text),
                scored("b", 2.0, Stage::Text),
                scored("c", 1.0, Stage::Text),
            ]],
            2,
        );

        assert_eq!(set.results.len(), 2);
        assert_eq!(set.total_candidates, 3);
        assert_eq!(set.limit_applied, 2);
    }

    #[test]
    fn empty_stages_merge_to_empty_set() {
        let set = merge(vec![vec![], vec![], vec![]], 10);
        assert!(set.results.is_empty());
        assert_eq!(set.total_candidates, 0);
    }
}
