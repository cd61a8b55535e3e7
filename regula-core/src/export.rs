use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{FailureRecord, Series};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an instant as `YYYY-MM-DD HH:MM:SS`, in `tz` when given, else UTC.
///
/// ```
/// use regula_core::format_timestamp;
/// use chrono::DateTime;
///
/// let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// assert_eq!(format_timestamp(ts, None), "2023-11-14 22:13:20");
/// ```
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>, tz: Option<chrono_tz::Tz>) -> String {
    match tz {
        Some(tz) => ts.with_timezone(&tz).format(DATE_FORMAT).to_string(),
        None => ts.format(DATE_FORMAT).to_string(),
    }
}

/// One row of the corrected-series table: `date` followed by one column per variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    /// Formatted timestamp.
    pub date: String,
    /// Values keyed by variable name; `None` for cells left missing.
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

/// One row of the failure table (`date,variable,original_value,expected_value,error_type`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRow {
    /// Formatted timestamp of the corrected cell.
    pub date: String,
    /// Corrected variable.
    pub variable: String,
    /// Value before correction.
    pub original_value: f64,
    /// Value written in its place.
    pub expected_value: f64,
    /// `variation`, `negative` or `inconsistency`.
    pub error_type: &'static str,
}

/// Rows of the corrected-series table.
#[must_use]
pub fn series_rows(series: &Series, tz: Option<chrono_tz::Tz>) -> Vec<SeriesRow> {
    series
        .samples()
        .iter()
        .map(|s| SeriesRow {
            date: format_timestamp(s.ts, tz),
            values: s.values.clone(),
        })
        .collect()
}

/// Rows of the failure table, in scan order.
#[must_use]
pub fn failure_rows(failures: &[FailureRecord], tz: Option<chrono_tz::Tz>) -> Vec<FailureRow> {
    failures
        .iter()
        .map(|f| FailureRow {
            date: format_timestamp(f.ts, tz),
            variable: f.variable.clone(),
            original_value: f.original_value,
            expected_value: f.expected_value,
            error_type: f.kind.as_str(),
        })
        .collect()
}

/// Missing timestamps as a flat list of formatted strings.
#[must_use]
pub fn missing_lines(missing: &[DateTime<Utc>], tz: Option<chrono_tz::Tz>) -> Vec<String> {
    missing.iter().map(|&ts| format_timestamp(ts, tz)).collect()
}
