//! Time-series stages shared by the pipeline and the `Regula` engine.
//!
//! Modules include:
//! - `infer`: infer the nominal sampling interval
//! - `regularize`: build the segmented grid and join samples onto it
//! - `interpolate`: fill short gaps inside segments
//! - `correct`: flag and replace implausible values
//! - `stats`: baseline variation and correlation helpers
/// Anomaly detection and correction over a filled frame.
pub mod correct;
/// Nominal interval inference.
pub mod infer;
/// Time-weighted gap filling.
pub mod interpolate;
/// Grid construction and sample joining.
pub mod regularize;
/// Statistics used to build correction baselines.
pub mod stats;
