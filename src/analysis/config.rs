// Configuration for the A/B analysis pipeline
//
// Validation runs before the input file is opened: a bad flag value must
// never cost the user a full data load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("alpha must be in (0, 1), got {0}")]
    Alpha(f64),

    #[error("winsor must be in [0, 0.5), got {0}")]
    Winsor(f64),

    #[error("bootstrap must be >= 1, got {0}")]
    Bootstrap(usize),
}

/// Configuration for a single analysis run
///
/// # Example
/// ```
/// use cotejo::analysis::AnalyzerConfig;
///
/// let config = AnalyzerConfig::default();
/// assert_eq!(config.alpha, 0.05); // 95% confidence
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Significance level (alpha) for hypothesis tests and the CI
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: 99% confidence level, stricter
    pub alpha: f64,

    /// Two-sided winsorization fraction applied to the metric
    ///
    /// Each group is clipped to its [w, 1-w] quantile range before the
    /// mean-based statistics. 0.0 disables clipping. The rank-based test
    /// always runs on the unclipped values.
    pub winsor: f64,

    /// Bootstrap resample count for the lift confidence interval
    pub bootstrap: usize,

    /// RNG seed for the bootstrap; `None` draws fresh entropy per run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,     // 95% confidence (standard in practice)
            winsor: 0.0,     // No clipping unless asked for
            bootstrap: 3000, // Enough resamples for stable percentile bounds
            seed: None,
        }
    }
}

impl AnalyzerConfig {
    /// Validate configuration ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::Alpha(self.alpha));
        }
        if !(0.0..0.5).contains(&self.winsor) {
            return Err(ConfigError::Winsor(self.winsor));
        }
        if self.bootstrap == 0 {
            return Err(ConfigError::Bootstrap(self.bootstrap));
        }
        Ok(())
    }
}
