// Configuration for interpreting the one-sample t-test
//
// The engine always reports the raw p-value; this config only decides how
// reports label it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for significance reporting
///
/// # Example
/// ```
/// use quizstats::significance::SignificanceConfig;
///
/// let config = SignificanceConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceConfig {
    /// Significance level (alpha): a p-value strictly below it is reported
    /// as a significant difference from random guessing
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: stricter, fewer exams flagged
    /// - 0.10: looser, more exams flagged
    pub significance_level: f64,

    /// Minimum number of submissions before a verdict is given
    ///
    /// With fewer submissions the standard error is zero or meaningless,
    /// so the report says "insufficient data" instead.
    ///
    /// Default: 2 submissions
    pub min_sample_size: usize,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            min_sample_size: 2,
        }
    }
}

impl SignificanceConfig {
    /// Create a strict configuration (99% confidence)
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            min_sample_size: 10,
        }
    }

    /// Create a permissive configuration (90% confidence)
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.10,
            min_sample_size: 2,
        }
    }

    /// Load configuration from a TOML file
    ///
    /// Missing keys fall back to [`SignificanceConfig::default`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            bail!("Config file not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref).context("Failed to read config file")?;
        let config: SignificanceConfig =
            toml::from_str(&contents).context("Invalid significance config TOML")?;

        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        tracing::debug!(?config, "loaded significance config");

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.significance_level) {
            return Err(format!(
                "significance_level must be in [0, 1], got {}",
                self.significance_level
            ));
        }

        if self.min_sample_size < 1 {
            return Err(format!(
                "min_sample_size must be >= 1, got {}",
                self.min_sample_size
            ));
        }

        Ok(())
    }
}
