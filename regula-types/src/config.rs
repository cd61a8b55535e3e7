//! Configuration shared by the pipeline stages and the `Regula` engine.

use serde::{Deserialize, Serialize};

use crate::error::RegulaError;

/// Tunables for regularization, interpolation and anomaly correction.
///
/// Defaults follow the conventional policy: 5-minute large-gap and short-gap
/// thresholds, a 10-second fallback cadence, a 5x variation bound, a 3x
/// consistency bound and a 0.7 correlation threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulaConfig {
    /// Inter-sample gaps strictly longer than this (minutes) split the grid into segments.
    pub large_gap_minutes: f64,
    /// Empty cells are filled only when both donors lie strictly closer than this (minutes).
    pub short_gap_minutes: f64,
    /// Cadence used when no sampling interval repeats.
    pub default_interval_seconds: i64,
    /// A step larger than `variation_factor * avg_variation` is a variation failure.
    pub variation_factor: f64,
    /// A deviation larger than `inconsistency_factor * avg_variation` from the
    /// correlate-implied value is an inconsistency failure.
    pub inconsistency_factor: f64,
    /// Minimum absolute Pearson correlation for two variables to be strong correlates.
    pub correlation_threshold: f64,
    /// Correlate values with magnitude below this are treated as zero divisors.
    pub ratio_epsilon: f64,
}

impl Default for RegulaConfig {
    fn default() -> Self {
        Self {
            large_gap_minutes: 5.0,
            short_gap_minutes: 5.0,
            default_interval_seconds: 10,
            variation_factor: 5.0,
            inconsistency_factor: 3.0,
            correlation_threshold: 0.7,
            ratio_epsilon: 1e-9,
        }
    }
}

impl RegulaConfig {
    /// Large-gap threshold in seconds.
    #[must_use]
    pub fn large_gap_seconds(&self) -> f64 {
        self.large_gap_minutes * 60.0
    }

    /// Check that every tunable is finite and within range.
    ///
    /// # Errors
    /// Returns `InvalidArg` naming the first offending field.
    pub fn validate(&self) -> Result<(), RegulaError> {
        let positive = [
            ("large_gap_minutes", self.large_gap_minutes),
            ("short_gap_minutes", self.short_gap_minutes),
            ("variation_factor", self.variation_factor),
            ("inconsistency_factor", self.inconsistency_factor),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(RegulaError::InvalidArg(format!(
                    "{name} must be a positive finite number, got {v}"
                )));
            }
        }
        if self.default_interval_seconds <= 0 {
            return Err(RegulaError::InvalidArg(format!(
                "default_interval_seconds must be positive, got {}",
                self.default_interval_seconds
            )));
        }
        if !(0.0..1.0).contains(&self.correlation_threshold) {
            return Err(RegulaError::InvalidArg(format!(
                "correlation_threshold must lie in [0, 1), got {}",
                self.correlation_threshold
            )));
        }
        if !self.ratio_epsilon.is_finite() || self.ratio_epsilon < 0.0 {
            return Err(RegulaError::InvalidArg(format!(
                "ratio_epsilon must be a non-negative finite number, got {}",
                self.ratio_epsilon
            )));
        }
        Ok(())
    }
}
