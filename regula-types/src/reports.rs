//! Audit records and the report envelope produced by the pipeline.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frame::Span;
use crate::sample::Series;

/// Reason a value was corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Step from the predecessor exceeded the variation bound.
    Variation,
    /// Negative value for a variable that must not be negative.
    Negative,
    /// Value disagreed with the value implied by a strongly correlated variable.
    Inconsistency,
}

impl ErrorKind {
    /// Stable lowercase label, as used in exported failure tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Variation => "variation",
            Self::Negative => "negative",
            Self::Inconsistency => "inconsistency",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected-and-corrected anomalous value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Grid timestamp of the corrected cell.
    pub ts: DateTime<Utc>,
    /// Variable that was corrected.
    pub variable: String,
    /// Value before correction.
    pub original_value: f64,
    /// Value written in its place.
    pub expected_value: f64,
    /// Which check fired.
    pub kind: ErrorKind,
}

/// Output of a full regularize-interpolate-correct run.
///
/// Besides the three core artifacts (corrected series, missing timestamps,
/// failure log) it carries diagnostics useful for presenting the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionReport {
    /// Regularized, gap-filled and corrected series (requested variables only).
    pub series: Series,
    /// Grid timestamps where at least one requested variable stayed missing, ascending.
    pub missing_timestamps: Vec<DateTime<Utc>>,
    /// Corrections in scan order.
    pub failures: Vec<FailureRecord>,
    /// Nominal sampling interval used for the grid.
    pub interval_seconds: i64,
    /// True when no interval repeated and the default cadence was used.
    pub interval_fallback: bool,
    /// Grid segments in chronological order.
    pub segments: Vec<Span>,
    /// First and last input timestamps.
    pub input_span: Span,
    /// Input samples whose timestamps did not fall on the grid.
    pub off_grid_samples: usize,
}

impl CorrectionReport {
    /// True when nothing was missing and nothing was corrected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing_timestamps.is_empty() && self.failures.is_empty()
    }

    /// Failures of a given kind.
    pub fn failures_of(&self, kind: ErrorKind) -> impl Iterator<Item = &FailureRecord> + '_ {
        self.failures.iter().filter(move |f| f.kind == kind)
    }
}
