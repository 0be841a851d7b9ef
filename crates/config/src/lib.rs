//! Analysis configuration for embias.
//!
//! The analogy finder's thresholds and candidate pool size are tuning knobs,
//! not constants. They live here, loadable from YAML, with defaults that work
//! on 300-dimensional news-corpus vectors.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub analogy: AnalogyConfig,
    pub ranking: RankingConfig,
}

/// Analogy mining parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalogyConfig {
    /// Candidate pool: the K most frequent vocabulary words (lowest indices).
    /// Enumeration is quadratic in this number.
    pub top_k: usize,
    /// A pair is kept only if the cosine between its difference vector and
    /// the reference exceeds this.
    pub min_similarity: f32,
    /// A pair is kept only if `| |diff| - |reference| |` is below this.
    pub max_magnitude_gap: f32,
    /// Cap on returned pairs, most confident first. `None` returns all.
    pub max_results: Option<usize>,
}

impl Default for AnalogyConfig {
    fn default() -> Self {
        Self {
            top_k: 20_000,
            min_similarity: 0.5,
            max_magnitude_gap: 0.5,
            max_results: None,
        }
    }
}

/// Projection ranking report parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Entries reported from each pole of an axis.
    pub poles: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { poles: 10 }
    }
}

impl AnalysisConfig {
    /// Parse from a YAML string. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reject thresholds that would make every query empty or meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analogy.validate()
    }
}

impl AnalogyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_similarity.is_finite() || !(-1.0..=1.0).contains(&self.min_similarity) {
            return Err(ConfigError::Invalid(format!(
                "analogy.min_similarity must be within [-1, 1], got {}",
                self.min_similarity
            )));
        }
        if !self.max_magnitude_gap.is_finite() || self.max_magnitude_gap <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "analogy.max_magnitude_gap must be positive, got {}",
                self.max_magnitude_gap
            )));
        }
        Ok(())
    }
}
