//! Analogy mining — word pairs whose difference matches a reference axis.
//!
//! `she − he` is an analogy of `queen − king` because the two differences
//! point the same way AND have about the same length. Direction alone is not
//! enough: `small − big` can be parallel to `she − he` at ten times the
//! scale, and nobody reads that as an analogy. So a pair must pass both:
//!
//! - cosine(v(a) − v(b), reference) > `min_similarity`
//! - | ‖v(a) − v(b)‖ − ‖reference‖ | < `max_magnitude_gap`
//!
//! Only the K most frequent words are candidates. Enumeration is quadratic
//! in K, so rows of the pair triangle are spread over the rayon pool; the
//! merged result is sorted into one deterministic order.

use std::cmp::Ordering;

use embias_config::AnalogyConfig;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::direction::Direction;
use crate::embedding::{self, Embedding, VectorTable};
use crate::error::{AnalysisError, AnalysisResult};

/// An accepted pair, oriented so `vector_diff` agrees with the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogyPair {
    pub word_a: String,
    pub word_b: String,
    /// `v(word_a) − v(word_b)`
    pub vector_diff: Embedding,
    /// Cosine between `vector_diff` and the reference.
    pub similarity: f32,
    /// `| ‖vector_diff‖ − ‖reference‖ |`
    pub magnitude_gap: f32,
}

/// Index-level candidate, before words and vectors are materialized.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    a: usize,
    b: usize,
    similarity: f32,
    magnitude_gap: f32,
}

/// Most confident first: similarity down, gap up, then indices.
fn confidence_order(x: &Candidate, y: &Candidate) -> Ordering {
    y.similarity
        .total_cmp(&x.similarity)
        .then(x.magnitude_gap.total_cmp(&y.magnitude_gap))
        .then(x.a.cmp(&y.a))
        .then(x.b.cmp(&y.b))
}

/// Finds analogy pairs in one table.
pub struct AnalogyFinder<'a> {
    table: &'a VectorTable,
    config: AnalogyConfig,
}

impl<'a> AnalogyFinder<'a> {
    pub fn new(table: &'a VectorTable, config: AnalogyConfig) -> Self {
        Self { table, config }
    }

    pub fn config(&self) -> &AnalogyConfig {
        &self.config
    }

    /// All pairs among the top-K words matching `reference` in direction and
    /// magnitude, most confident first.
    pub fn find(&self, reference: &Direction) -> AnalysisResult<Vec<AnalogyPair>> {
        self.config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;

        let r = reference.as_slice();
        self.table.check_dimensions(r)?;
        let r_norm = embedding::norm(r);
        if r_norm == 0.0 {
            return Err(AnalysisError::ZeroMagnitude("analogy reference"));
        }

        let dims = self.table.dimensions();
        let pool = self.table.head(self.config.top_k);
        let k = pool.len() / dims;

        // cos(v_i − v_j, r) = (v_i·r − v_j·r) / (‖v_i − v_j‖‖r‖)
        let projections: Vec<f32> = pool
            .par_chunks_exact(dims)
            .map(|v| embedding::dot(v, r))
            .collect();

        let min_similarity = self.config.min_similarity;
        let max_gap = self.config.max_magnitude_gap;

        let mut accepted: Vec<Candidate> = (0..k)
            .into_par_iter()
            .flat_map_iter(|i| {
                let vi = &pool[i * dims..(i + 1) * dims];
                let projections = &projections;
                (i + 1..k).filter_map(move |j| {
                    let vj = &pool[j * dims..(j + 1) * dims];
                    let diff_norm = distance(vi, vj);
                    if diff_norm == 0.0 {
                        // identical vectors have no direction
                        return None;
                    }
                    let cos = (projections[i] - projections[j]) / (diff_norm * r_norm);
                    let (a, b, similarity) = if cos < 0.0 { (j, i, -cos) } else { (i, j, cos) };
                    let magnitude_gap = (diff_norm - r_norm).abs();
                    (similarity > min_similarity && magnitude_gap < max_gap).then_some(Candidate {
                        a,
                        b,
                        similarity,
                        magnitude_gap,
                    })
                })
            })
            .collect();

        accepted.par_sort_unstable_by(confidence_order);
        if let Some(limit) = self.config.max_results {
            accepted.truncate(limit);
        }
        debug!(pool = k, accepted = accepted.len(), "analogy search");

        accepted
            .into_iter()
            .map(|c| self.materialize(c))
            .collect()
    }

    fn materialize(&self, c: Candidate) -> AnalysisResult<AnalogyPair> {
        Ok(AnalogyPair {
            word_a: self.table.word_at(c.a)?.to_string(),
            word_b: self.table.word_at(c.b)?.to_string(),
            vector_diff: embedding::difference(
                self.table.vector_at(c.a)?,
                self.table.vector_at(c.b)?,
            ),
            similarity: c.similarity,
            magnitude_gap: c.magnitude_gap,
        })
    }
}

/// ‖a − b‖ without allocating the difference.
fn distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}
