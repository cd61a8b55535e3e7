use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the regula workspace.
///
/// Covers input validation failures, data-shape problems and the fatal
/// conditions raised by the regularization pipeline. Recoverable conditions
/// (degenerate cadence, zero baseline variation) are handled locally and never
/// surface as errors.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegulaError {
    /// Fewer than two valid timestamped samples were supplied.
    #[error("insufficient data: need at least 2 samples, found {found}")]
    InsufficientData {
        /// Number of usable samples found.
        found: usize,
    },

    /// A requested variable is not present among the input columns.
    #[error("unknown variable: {name}")]
    UnknownVariable {
        /// Variable name as requested by the caller.
        name: String,
    },

    /// Two input samples share the same timestamp.
    #[error("duplicate timestamp: {ts}")]
    DuplicateTimestamp {
        /// Offending timestamp, formatted `YYYY-MM-DD HH:MM:SS`.
        ts: String,
    },

    /// Issues with the computed or expected data shape.
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl RegulaError {
    /// Helper: build an `InsufficientData` error.
    #[must_use]
    pub const fn insufficient_data(found: usize) -> Self {
        Self::InsufficientData { found }
    }

    /// Helper: build an `UnknownVariable` error for a variable name.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Helper: build a `DuplicateTimestamp` error.
    pub fn duplicate_timestamp(ts: chrono::DateTime<chrono::Utc>) -> Self {
        Self::DuplicateTimestamp {
            ts: ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Returns true if the failure stems from caller input rather than the data itself.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(self, Self::UnknownVariable { .. } | Self::InvalidArg(_))
    }
}
