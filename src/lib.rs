//! embias — bias directions in word-embedding space.
//!
//! Load a pretrained embedding once into a [`VectorTable`], derive semantic
//! axes from contrastive words ([`DirectionBuilder`]), then ask which words
//! sit at either end of an axis ([`NeighborRanker`]) or which word pairs
//! repeat it ([`AnalogyFinder`]). Everything is a pure function over the
//! read-only table; rendering the results is the caller's business.

pub mod analogy;
pub mod direction;
pub mod embedding;
pub mod error;
pub mod ranking;

pub use analogy::{AnalogyFinder, AnalogyPair};
pub use direction::{Direction, DirectionBuilder, PairMode};
pub use embedding::{Embedding, EmbeddingSource, VectorTable};
pub use embias_config::{AnalogyConfig, AnalysisConfig, ConfigError, RankingConfig};
pub use error::{AnalysisError, AnalysisResult};
pub use ranking::{poles, NeighborRanker, ScoredWord};
