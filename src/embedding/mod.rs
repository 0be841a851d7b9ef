//! Embedding space primitives.
//!
//! A pretrained embedding is loaded once into a `VectorTable` and never
//! mutated. The free functions here are the vector arithmetic every analysis
//! component shares: dot products, norms, differences, cosine similarity.

pub mod table;

pub use table::VectorTable;

/// A single embedding vector.
pub type Embedding = Vec<f32>;

/// Supplier of vocabulary + vectors. Pluggable — the loader for whatever
/// on-disk format lives outside this crate.
pub trait EmbeddingSource {
    /// Dimensionality of every vector the source yields.
    fn dimensions(&self) -> usize;
    /// Rows in corpus frequency order, most frequent first.
    fn rows(&self) -> Box<dyn Iterator<Item = (String, Embedding)> + '_>;
}

/// In-memory source, rows in the order given.
impl EmbeddingSource for Vec<(String, Embedding)> {
    fn dimensions(&self) -> usize {
        self.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    fn rows(&self) -> Box<dyn Iterator<Item = (String, Embedding)> + '_> {
        Box::new(self.iter().cloned())
    }
}

/// Dot product. Callers guarantee equal lengths; extra components are ignored.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Element-wise `a - b`.
pub fn difference(a: &[f32], b: &[f32]) -> Embedding {
    a.iter().zip(b.iter()).map(|(x, y)| x - y).collect()
}

/// Normalize a vector to unit length (in-place).
///
/// Returns `false` and leaves the vector untouched if its norm is zero.
pub fn normalize(v: &mut [f32]) -> bool {
    let n = norm(v);
    if n > 0.0 {
        for x in v.iter_mut() {
            *x /= n;
        }
        true
    } else {
        false
    }
}

/// Cosine similarity between two vectors.
///
/// Mismatched lengths, empty inputs and zero vectors all score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot(a, b) / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_identical_vectors() {
        let a = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn cosine_opposite_vectors() {
        let a = vec![1.0, -2.0];
        let b = vec![-2.0, 4.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn dot_and_norm() {
        assert_eq!(dot(&[1.0, 1.0], &[-1.0, 1.0]), 0.0);
        assert_eq!(dot(&[0.0, 2.0], &[-1.0, 1.0]), 2.0);
        assert!((norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn difference_is_elementwise() {
        assert_eq!(difference(&[0.0, 1.0], &[1.0, 0.0]), vec![-1.0, 1.0]);
    }

    #[test]
    fn normalize_to_unit() {
        let mut v = vec![3.0, 4.0];
        assert!(normalize(&mut v));
        assert!((norm(&v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector_is_noop() {
        let mut v = vec![0.0, 0.0];
        assert!(!normalize(&mut v));
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn vec_source_reports_rows_in_order() {
        let source = vec![
            ("he".to_string(), vec![1.0, 0.0]),
            ("she".to_string(), vec![0.0, 1.0]),
        ];
        assert_eq!(source.dimensions(), 2);
        let words: Vec<String> = source.rows().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["he", "she"]);
    }
}
