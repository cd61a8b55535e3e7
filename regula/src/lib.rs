//! Regula turns irregular, gappy sensor logs into clean regular series.
//!
//! Overview
//! - Infers the nominal sampling interval from the input timestamps.
//! - Lays the samples onto a regular grid, split into segments at large gaps.
//! - Fills short holes by time-weighted interpolation inside each segment and
//!   records the timestamps it could not fill.
//! - Replaces implausible values (sudden jumps, forbidden negatives, broken
//!   ratios to a strongly correlated variable) and logs every replacement.
//!
//! Key behaviors and trade-offs
//! - Large gaps are never bridged: no grid point and no interpolated value is
//!   produced inside them, at the cost of leaving the series segmented.
//! - Correction is a forward scan within each segment. Corrections carry
//!   forward, so a value is judged against its already-corrected predecessor,
//!   and variables earlier in the selection are corrected before later ones in
//!   each row. A corrected value is final, which makes a second pass with the
//!   same baseline a no-op.
//! - Baselines (average step, correlated pairs) are fitted on the whole filled
//!   series, so a long run of outliers raises its own threshold.
//!
//! Examples
//! ```
//! use regula::{Regula, Sample};
//! use chrono::DateTime;
//!
//! let t = |s: i64| DateTime::from_timestamp(1_700_000_000 + s, 0).unwrap();
//! let samples = (0..10).map(|i| {
//!     let v = if i == 4 { None } else { Some(20.0 + i as f64) };
//!     Sample::new(t(i * 60)).with("temp", v)
//! });
//!
//! let engine = Regula::builder().variables(["temp"]).build()?;
//! let report = engine.run(samples)?;
//! assert_eq!(report.interval_seconds, 60);
//! assert_eq!(report.series.samples()[4].value("temp"), Some(24.0));
//! assert!(report.is_clean());
//! # Ok::<(), regula::RegulaError>(())
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{RecordsReport, Regula, RegulaBuilder};

pub use regula_core::{
    AnomalyCorrector, Baseline, Cell, CellState, Column, CorrectionReport, ErrorKind,
    FailureRecord, FailureRow, Frame, Grid, IntervalEstimate, RegulaConfig, RegulaError, Sample,
    Series, SeriesRow, Span, format_timestamp, parse_timestamp,
};

/// Individual pipeline stages for callers composing their own flow.
pub mod stages {
    pub use regula_core::{
        build_grid, estimate_interval, interpolate, regularize, regularize_and_correct,
    };
}
