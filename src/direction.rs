//! Semantic directions — axes like gender or race in embedding space.
//!
//! Two ways to build one:
//! - From a single contrastive pair (`she` − `he`). Raw mode keeps the
//!   difference as-is (an analogy reference, whose magnitude matters);
//!   Unit mode normalizes it (a bias axis for projection scoring).
//! - From two word groups. Each group's summed vector is normalized on its
//!   own before differencing, so a group of larger-magnitude vectors cannot
//!   dominate the axis. The difference is normalized again.

use serde::Serialize;
use tracing::debug;

use crate::embedding::{self, Embedding, VectorTable};
use crate::error::{AnalysisError, AnalysisResult};

/// Whether a pair difference is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMode {
    /// `v(pos) - v(neg)` untouched.
    Raw,
    /// `v(pos) - v(neg)` scaled to unit length.
    Unit,
}

/// A semantic axis. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Direction {
    vector: Embedding,
    unit: bool,
}

impl Direction {
    /// Wrap a caller-supplied axis as-is.
    pub fn from_vector(vector: Embedding) -> Self {
        Self {
            vector,
            unit: false,
        }
    }

    /// Wrap a caller-supplied axis, scaled to unit length.
    pub fn unit_from_vector(mut vector: Embedding) -> AnalysisResult<Self> {
        if !embedding::normalize(&mut vector) {
            return Err(AnalysisError::ZeroMagnitude("direction"));
        }
        Ok(Self { vector, unit: true })
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.vector
    }

    pub fn into_vector(self) -> Embedding {
        self.vector
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f32 {
        embedding::norm(&self.vector)
    }

    /// Whether this direction was normalized when built.
    pub fn is_unit(&self) -> bool {
        self.unit
    }

    /// The same axis pointing the other way.
    pub fn negated(&self) -> Self {
        Self {
            vector: self.vector.iter().map(|x| -x).collect(),
            unit: self.unit,
        }
    }
}

/// Builds directions against one table.
pub struct DirectionBuilder<'a> {
    table: &'a VectorTable,
}

impl<'a> DirectionBuilder<'a> {
    pub fn new(table: &'a VectorTable) -> Self {
        Self { table }
    }

    /// `v(word_pos) - v(word_neg)`, raw or unit-length.
    pub fn from_pair(
        &self,
        word_pos: &str,
        word_neg: &str,
        mode: PairMode,
    ) -> AnalysisResult<Direction> {
        let pos = self.table.vector_of(word_pos)?;
        let neg = self.table.vector_of(word_neg)?;
        let diff = embedding::difference(pos, neg);
        debug!(word_pos, word_neg, ?mode, "pair direction");
        match mode {
            PairMode::Raw => Ok(Direction::from_vector(diff)),
            PairMode::Unit => Direction::unit_from_vector(diff),
        }
    }

    /// Unit difference of the two groups' unit centroids.
    ///
    /// Every member is looked up before anything is summed: an unknown word
    /// fails the whole call rather than being skipped.
    pub fn from_groups<P, N>(&self, group_pos: &[P], group_neg: &[N]) -> AnalysisResult<Direction>
    where
        P: AsRef<str>,
        N: AsRef<str>,
    {
        let pos = self.unit_centroid(group_pos, "positive group")?;
        let neg = self.unit_centroid(group_neg, "negative group")?;
        debug!(
            pos = group_pos.len(),
            neg = group_neg.len(),
            "group direction"
        );
        Direction::unit_from_vector(embedding::difference(&pos, &neg))
    }

    /// Mean of several unit pair differences, normalized.
    ///
    /// Several definitional pairs (`she`/`he`, `woman`/`man`, `her`/`his`)
    /// give a steadier axis than any single pair.
    pub fn from_pairs<P, N>(&self, pairs: &[(P, N)]) -> AnalysisResult<Direction>
    where
        P: AsRef<str>,
        N: AsRef<str>,
    {
        if pairs.is_empty() {
            return Err(AnalysisError::EmptyGroup("pair list"));
        }
        let mut sum = vec![0.0f32; self.table.dimensions()];
        for (pos, neg) in pairs {
            let d = self.from_pair(pos.as_ref(), neg.as_ref(), PairMode::Unit)?;
            for (s, x) in sum.iter_mut().zip(d.as_slice()) {
                *s += x;
            }
        }
        // Scaling by 1/n doesn't change the normalized result.
        Direction::unit_from_vector(sum)
    }

    fn unit_centroid<S: AsRef<str>>(
        &self,
        group: &[S],
        side: &'static str,
    ) -> AnalysisResult<Embedding> {
        if group.is_empty() {
            return Err(AnalysisError::EmptyGroup(side));
        }
        let mut sum = vec![0.0f32; self.table.dimensions()];
        for word in group {
            let v = self.table.vector_of(word.as_ref())?;
            for (s, x) in sum.iter_mut().zip(v) {
                *s += x;
            }
        }
        if !embedding::normalize(&mut sum) {
            return Err(AnalysisError::ZeroMagnitude(side));
        }
        Ok(sum)
    }
}
