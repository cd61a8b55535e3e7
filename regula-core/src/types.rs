//! Re-export of foundational types from `regula-types`.
// Consolidated re-exports so downstream crates can depend on `regula-core` only

pub use regula_types::{
    Cell, CellState, Column, CorrectionReport, ErrorKind, FailureRecord, Frame, Grid,
    RegulaConfig, RegulaError, Sample, Series, Span,
};
