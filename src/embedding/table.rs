//! VectorTable — immutable word → vector lookup.
//!
//! Vectors live in one flat row-major buffer so a row is a slice and the
//! whole matrix can be walked in chunks. Row order is vocabulary order,
//! which is corpus frequency rank: index 0 is the most frequent word.

use std::collections::HashMap;

use tracing::debug;

use super::{Embedding, EmbeddingSource};
use crate::error::{AnalysisError, AnalysisResult};

/// Word embeddings held in memory for one analysis session.
#[derive(Debug, Clone)]
pub struct VectorTable {
    /// index → word
    words: Vec<String>,
    /// word → index
    index: HashMap<String, usize>,
    /// `words.len() * dims` values, row-major
    vectors: Vec<f32>,
    dims: usize,
}

impl VectorTable {
    /// Create an empty table for vectors of `dims` components.
    pub fn new(dims: usize) -> AnalysisResult<Self> {
        if dims == 0 {
            return Err(AnalysisError::ZeroDimensions);
        }
        Ok(Self {
            words: Vec::new(),
            index: HashMap::new(),
            vectors: Vec::new(),
            dims,
        })
    }

    /// Append a word. Insertion order is frequency order.
    pub fn insert(&mut self, word: &str, vector: &[f32]) -> AnalysisResult<usize> {
        if vector.len() != self.dims {
            return Err(AnalysisError::DimensionMismatch {
                expected: self.dims,
                got: vector.len(),
            });
        }
        if self.index.contains_key(word) {
            return Err(AnalysisError::DuplicateWord(word.to_string()));
        }
        let idx = self.words.len();
        self.index.insert(word.to_string(), idx);
        self.words.push(word.to_string());
        self.vectors.extend_from_slice(vector);
        Ok(idx)
    }

    /// Build from `(word, vector)` rows in frequency order.
    pub fn from_rows<I>(dims: usize, rows: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = (String, Embedding)>,
    {
        let mut table = Self::new(dims)?;
        for (word, vector) in rows {
            table.insert(&word, &vector)?;
        }
        debug!(words = table.size(), dims, "built vector table");
        Ok(table)
    }

    /// Build from an external loader.
    pub fn from_source(source: &dyn EmbeddingSource) -> AnalysisResult<Self> {
        Self::from_rows(source.dimensions(), source.rows())
    }

    /// Vector for a word.
    pub fn vector_of(&self, word: &str) -> AnalysisResult<&[f32]> {
        let idx = self.index_of(word)?;
        Ok(self.row(idx))
    }

    /// Vocabulary index of a word.
    pub fn index_of(&self, word: &str) -> AnalysisResult<usize> {
        self.index
            .get(word)
            .copied()
            .ok_or_else(|| AnalysisError::UnknownWord(word.to_string()))
    }

    /// Word at a vocabulary index.
    pub fn word_at(&self, index: usize) -> AnalysisResult<&str> {
        self.words
            .get(index)
            .map(|w| w.as_str())
            .ok_or(AnalysisError::IndexOutOfRange {
                index,
                size: self.words.len(),
            })
    }

    /// Vector at a vocabulary index.
    pub fn vector_at(&self, index: usize) -> AnalysisResult<&[f32]> {
        if index >= self.words.len() {
            return Err(AnalysisError::IndexOutOfRange {
                index,
                size: self.words.len(),
            });
        }
        Ok(self.row(index))
    }

    /// Whether a word is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Vocabulary count.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Whether the table holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Dimensionality of every vector.
    pub fn dimensions(&self) -> usize {
        self.dims
    }

    /// Words in index order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    /// `(word, vector)` in index order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.words
            .iter()
            .map(|w| w.as_str())
            .zip(self.vectors.chunks_exact(self.dims))
    }

    /// The first `n` rows as one contiguous slice (clamped to the table size).
    pub(crate) fn head(&self, n: usize) -> &[f32] {
        let n = n.min(self.words.len());
        &self.vectors[..n * self.dims]
    }

    /// Fail unless `v` has this table's width.
    pub(crate) fn check_dimensions(&self, v: &[f32]) -> AnalysisResult<()> {
        if v.len() != self.dims {
            return Err(AnalysisError::DimensionMismatch {
                expected: self.dims,
                got: v.len(),
            });
        }
        Ok(())
    }

    fn row(&self, idx: usize) -> &[f32] {
        &self.vectors[idx * self.dims..(idx + 1) * self.dims]
    }
}
