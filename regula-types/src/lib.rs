//! Regula-specific data transfer objects, configuration and error primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod frame;
mod reports;
mod sample;

pub use config::RegulaConfig;
pub use error::RegulaError;
pub use frame::{Cell, CellState, Column, Frame, Grid, Span};
pub use reports::{CorrectionReport, ErrorKind, FailureRecord};
pub use sample::{Sample, Series};
