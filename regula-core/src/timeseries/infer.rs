use chrono::{DateTime, Utc};

use crate::{RegulaError, Series};

/// Cadence used when no interval repeats in the input.
pub const DEFAULT_INTERVAL_SECONDS: i64 = 10;

/// Result of nominal interval inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalEstimate {
    /// Nominal step between consecutive samples.
    pub seconds: i64,
    /// True when every observed delta was distinct and `seconds` is the default cadence.
    pub fallback: bool,
}

/// Most frequent positive adjacent delta (seconds) and how often it occurs.
///
/// Ties are broken toward the smallest delta. Returns `None` when fewer than
/// two distinct timestamps are present.
///
/// ```
/// use regula_core::timeseries::infer::mode_step_seconds;
/// use chrono::{DateTime, Utc};
///
/// fn t(sec: i64) -> DateTime<Utc> { DateTime::from_timestamp(sec, 0).unwrap() }
///
/// // Adjacent deltas: 60,60,60,120,180  => mode is 60 (3 occurrences)
/// let ts = [t(0), t(60), t(120), t(180), t(300), t(480)];
/// assert_eq!(mode_step_seconds(&ts), Some((60, 3)));
///
/// // Adjacent deltas: 120,120,60,60  => tie, smallest wins
/// let ts = [t(0), t(120), t(240), t(300), t(360)];
/// assert_eq!(mode_step_seconds(&ts), Some((60, 2)));
/// ```
#[must_use]
pub fn mode_step_seconds(timestamps: &[DateTime<Utc>]) -> Option<(i64, usize)> {
    let mut ts: Vec<i64> = timestamps.iter().map(DateTime::timestamp).collect();
    ts.sort_unstable();

    let mut deltas: Vec<i64> = ts
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&d| d > 0)
        .collect();
    if deltas.is_empty() {
        return None;
    }
    deltas.sort_unstable();

    // Runs are visited in ascending delta order; only a strictly longer run
    // replaces the current best, so the smallest tied delta is kept.
    let mut best_delta: i64 = deltas[0];
    let mut best_count: usize = 0;

    let mut cur_delta: i64 = deltas[0];
    let mut cur_count: usize = 1;
    for &d in deltas.iter().skip(1) {
        if d == cur_delta {
            cur_count += 1;
            continue;
        }
        if cur_count > best_count {
            best_count = cur_count;
            best_delta = cur_delta;
        }
        cur_delta = d;
        cur_count = 1;
    }
    if cur_count > best_count {
        best_count = cur_count;
        best_delta = cur_delta;
    }

    Some((best_delta, best_count))
}

/// Infer the nominal sampling interval of a series.
///
/// Returns the mode of adjacent deltas (smallest on ties). When at least two
/// deltas exist and all of them are distinct, no cadence can be inferred and
/// `default_seconds` is returned with `fallback` set. A single delta (two
/// samples) is taken as-is.
///
/// # Errors
/// Returns `InsufficientData` if the series has fewer than two samples.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "regula_core::infer::estimate_interval",
        skip(series),
        fields(samples = series.len()),
    )
)]
pub fn estimate_interval(
    series: &Series,
    default_seconds: i64,
) -> Result<IntervalEstimate, RegulaError> {
    if series.len() < 2 {
        return Err(RegulaError::insufficient_data(series.len()));
    }
    let ts: Vec<DateTime<Utc>> = series.timestamps().collect();
    let (mode, count) = mode_step_seconds(&ts)
        .ok_or_else(|| RegulaError::Data("series has no positive timestamp deltas".into()))?;

    let n_deltas = ts.len() - 1;
    if count == 1 && n_deltas >= 2 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            deltas = n_deltas,
            default_seconds,
            "no repeated sampling interval; using default cadence"
        );
        return Ok(IntervalEstimate {
            seconds: default_seconds,
            fallback: true,
        });
    }

    Ok(IntervalEstimate {
        seconds: mode,
        fallback: false,
    })
}
