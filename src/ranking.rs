//! Projection ranking — where words fall along a semantic axis.
//!
//! A word's score is the dot product of its vector with the direction: the
//! signed distance along the axis. Ranking works on a caller-chosen subset
//! (professions, names) since ranking the whole vocabulary buries the
//! interesting words under noise.

use serde::Serialize;

use crate::direction::Direction;
use crate::embedding::{self, VectorTable};
use crate::error::AnalysisResult;

/// A word and its score along a direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredWord {
    pub score: f32,
    pub word: String,
}

/// Ranks words against directions in one table.
pub struct NeighborRanker<'a> {
    table: &'a VectorTable,
}

impl<'a> NeighborRanker<'a> {
    pub fn new(table: &'a VectorTable) -> Self {
        Self { table }
    }

    /// Score every candidate by projection, ascending.
    ///
    /// Stable: equal scores keep input order. Duplicated candidates are
    /// scored once per occurrence.
    pub fn rank_by_projection<S: AsRef<str>>(
        &self,
        direction: &Direction,
        candidates: &[S],
    ) -> AnalysisResult<Vec<ScoredWord>> {
        self.table.check_dimensions(direction.as_slice())?;

        let mut scored = candidates
            .iter()
            .map(|word| {
                let word = word.as_ref();
                let v = self.table.vector_of(word)?;
                Ok(ScoredWord {
                    score: embedding::dot(v, direction.as_slice()),
                    word: word.to_string(),
                })
            })
            .collect::<AnalysisResult<Vec<_>>>()?;

        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        Ok(scored)
    }

    /// Cosine nearest neighbors of `query` over the whole vocabulary.
    ///
    /// Descending similarity; equal scores fall back to vocabulary order.
    pub fn nearest(&self, query: &[f32], n: usize) -> AnalysisResult<Vec<ScoredWord>> {
        self.table.check_dimensions(query)?;

        let mut results: Vec<(usize, f32)> = self
            .table
            .rows()
            .enumerate()
            .map(|(i, (_, v))| (i, embedding::cosine_similarity(query, v)))
            .collect();

        results.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        results.truncate(n);

        results
            .into_iter()
            .map(|(i, score)| {
                Ok(ScoredWord {
                    score,
                    word: self.table.word_at(i)?.to_string(),
                })
            })
            .collect()
    }
}

/// The two ends of an ascending ranking: the `n` lowest (most negative
/// first) and the `n` highest (most positive first).
///
/// When the ranking has fewer than `2n` entries the poles overlap.
pub fn poles(ranked: &[ScoredWord], n: usize) -> (Vec<ScoredWord>, Vec<ScoredWord>) {
    let low = ranked.iter().take(n).cloned().collect();
    let high = ranked.iter().rev().take(n).cloned().collect();
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{DirectionBuilder, PairMode};
    use crate::error::AnalysisError;

    fn sample() -> VectorTable {
        VectorTable::from_rows(
            2,
            vec![
                ("he".to_string(), vec![1.0, 0.0]),
                ("she".to_string(), vec![0.0, 1.0]),
                ("king".to_string(), vec![1.0, 1.0]),
                ("queen".to_string(), vec![0.0, 2.0]),
                ("nurse".to_string(), vec![0.2, 1.5]),
                ("engineer".to_string(), vec![1.6, 0.1]),
                ("teacher".to_string(), vec![0.8, 0.8]),
            ],
        )
        .unwrap()
    }

    fn words(ranked: &[ScoredWord]) -> Vec<&str> {
        ranked.iter().map(|s| s.word.as_str()).collect()
    }

    #[test]
    fn king_and_queen_along_she_minus_he() {
        let table = sample();
        let d = DirectionBuilder::new(&table)
            .from_pair("she", "he", PairMode::Raw)
            .unwrap();
        let ranked = NeighborRanker::new(&table)
            .rank_by_projection(&d, &["queen", "king"])
            .unwrap();
        assert_eq!(words(&ranked), vec!["king", "queen"]);
        assert_eq!(ranked[0].score, 0.0);
        assert_eq!(ranked[1].score, 2.0);
    }

    #[test]
    fn ranking_is_sorted_permutation() {
        let table = sample();
        let d = DirectionBuilder::new(&table)
            .from_groups(&["she", "queen"], &["he", "king"])
            .unwrap();
        let candidates = ["teacher", "nurse", "engineer", "king", "queen"];
        let ranked = NeighborRanker::new(&table)
            .rank_by_projection(&d, &candidates)
            .unwrap();

        for w in ranked.windows(2) {
            assert!(w[0].score <= w[1].score);
        }
        let mut got = words(&ranked);
        got.sort();
        let mut expected = candidates.to_vec();
        expected.sort();
        assert_eq!(got, expected);
        assert_eq!(ranked.first().unwrap().word, "engineer");
        assert_eq!(ranked.last().unwrap().word, "queen");
    }

    #[test]
    fn ties_keep_input_order() {
        let table = sample();
        // king and teacher both sit on the diagonal, orthogonal to this axis
        let d = Direction::from_vector(vec![-1.0, 1.0]);
        let ranked = NeighborRanker::new(&table)
            .rank_by_projection(&d, &["teacher", "king"])
            .unwrap();
        assert_eq!(words(&ranked), vec!["teacher", "king"]);
        let ranked = NeighborRanker::new(&table)
            .rank_by_projection(&d, &["king", "teacher"])
            .unwrap();
        assert_eq!(words(&ranked), vec!["king", "teacher"]);
    }

    #[test]
    fn unknown_candidate_aborts() {
        let table = sample();
        let d = Direction::from_vector(vec![0.0, 1.0]);
        let err = NeighborRanker::new(&table)
            .rank_by_projection(&d, &["nurse", "pilot"])
            .unwrap_err();
        assert_eq!(err, AnalysisError::UnknownWord("pilot".into()));
    }

    #[test]
    fn wrong_width_direction() {
        let table = sample();
        let d = Direction::from_vector(vec![0.0, 1.0, 0.0]);
        let err = NeighborRanker::new(&table)
            .rank_by_projection(&d, &["nurse"])
            .unwrap_err();
        assert_eq!(err, AnalysisError::DimensionMismatch { expected: 2, got: 3 });
    }

    #[test]
    fn empty_candidates() {
        let table = sample();
        let d = Direction::from_vector(vec![0.0, 1.0]);
        let none: [&str; 0] = [];
        let ranked = NeighborRanker::new(&table).rank_by_projection(&d, &none).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn poles_take_both_ends() {
        let table = sample();
        let d = Direction::from_vector(vec![-1.0, 1.0]);
        let ranked = NeighborRanker::new(&table)
            .rank_by_projection(&d, &["engineer", "he", "teacher", "she", "nurse"])
            .unwrap();
        let (low, high) = poles(&ranked, 2);
        assert_eq!(words(&low), vec!["engineer", "he"]);
        assert_eq!(words(&high), vec!["nurse", "she"]);
    }

    #[test]
    fn nearest_by_cosine() {
        let table = sample();
        let ranker = NeighborRanker::new(&table);
        let nearest = ranker.nearest(table.vector_of("she").unwrap(), 2).unwrap();
        // she and queen point the same way
        assert_eq!(nearest.len(), 2);
        assert!((nearest[0].score - 1.0).abs() < 1e-6);
        assert!((nearest[1].score - 1.0).abs() < 1e-6);
        assert_eq!(words(&nearest), vec!["she", "queen"]);

        assert!(ranker.nearest(&[1.0], 2).is_err());
        assert_eq!(ranker.nearest(&[1.0, 0.0], 100).unwrap().len(), table.size());
    }

    #[test]
    fn ranking_serializes_for_reports() {
        let s = ScoredWord {
            score: 2.0,
            word: "queen".into(),
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"score":2.0,"word":"queen"}"#);
    }
}
