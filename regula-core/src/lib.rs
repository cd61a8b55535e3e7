//! regula-core
//!
//! Core stages, statistics and I/O boundary helpers shared across the regula
//! ecosystem.
//!
//! - `types`: re-exported data model (samples, frames, reports, config, errors).
//! - `timeseries`: the four pipeline stages and their statistics helpers.
//! - `ingest`: turning timestamp strings and value maps into samples.
//! - `export`: row shapes for the corrected series and failure tables.
//! - `pipeline`: `regularize_and_correct`, the end-to-end batch function.
//!
//! Every stage takes its input by reference and returns a new value; nothing
//! is shared or mutated across stages, and the whole pipeline is synchronous.
#![warn(missing_docs)]

/// Row shapes and timestamp formatting for exported artifacts.
pub mod export;
/// Parsing of raw timestamp strings into samples.
pub mod ingest;
/// End-to-end regularize, interpolate and correct.
pub mod pipeline;
/// Time-series stages: cadence inference, regularization, interpolation, correction.
pub mod timeseries;
pub mod types;

pub use export::{
    FailureRow, SeriesRow, failure_rows, format_timestamp, missing_lines, series_rows,
};
pub use ingest::{Ingested, parse_timestamp, samples_from_records};
pub use pipeline::regularize_and_correct;
pub use timeseries::correct::{AnomalyCorrector, Baseline, Corrected};
pub use timeseries::infer::{DEFAULT_INTERVAL_SECONDS, IntervalEstimate, estimate_interval};
pub use timeseries::interpolate::{Interpolated, interpolate};
pub use timeseries::regularize::{Regularized, build_grid, regularize};
pub use types::*;
