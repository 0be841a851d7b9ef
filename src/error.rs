//! Error types for embedding analysis.

use thiserror::Error;

/// Every way an analysis query can fail. All of these are caller or input
/// errors; none are transient, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Word absent from the vocabulary.
    #[error("unknown word: '{0}'")]
    UnknownWord(String),

    /// A word group (or pair list) had no members. Names the offending side.
    #[error("empty group: {0}")]
    EmptyGroup(&'static str),

    /// Reverse lookup past the end of the vocabulary.
    #[error("index {index} out of range for vocabulary of {size} words")]
    IndexOutOfRange { index: usize, size: usize },

    /// Vector width does not match the table's dimensionality.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The same word was inserted into a table twice.
    #[error("duplicate word: '{0}'")]
    DuplicateWord(String),

    /// Tried to normalize a vector of zero length.
    #[error("zero-magnitude vector: {0}")]
    ZeroMagnitude(&'static str),

    /// Analysis parameters failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A table must have at least one dimension.
    #[error("embedding tables need at least one dimension")]
    ZeroDimensions,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
