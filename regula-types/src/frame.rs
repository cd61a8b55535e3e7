//! Regular grid and the columnar frame passed between pipeline stages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sample::{Sample, Series};

/// A continuous span of timestamps `[start..=end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start timestamp (seconds since epoch).
    pub start: i64,
    /// Inclusive end timestamp (seconds since epoch).
    pub end: i64,
}

impl Span {
    /// True if `ts` (seconds since epoch) lies inside the span.
    #[must_use]
    pub const fn contains(&self, ts: i64) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Length of the span in seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> i64 {
        self.end - self.start
    }
}

/// Provenance of a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// No original sample at this grid point yet; awaiting interpolation.
    Empty,
    /// Value came from an input sample.
    Original,
    /// Value computed by the interpolator.
    Interpolated,
    /// The interpolator could not safely fill this cell.
    Missing,
    /// Value replaced by the anomaly corrector.
    Corrected,
}

/// One (grid timestamp, variable) value with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Current value, `None` when empty or missing.
    pub value: Option<f64>,
    /// How the value was obtained.
    pub state: CellState,
}

impl Cell {
    /// Cell for a grid point joined against an input sample value.
    #[must_use]
    pub const fn joined(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self {
                value: Some(v),
                state: CellState::Original,
            },
            None => Self::EMPTY,
        }
    }

    /// An empty cell.
    pub const EMPTY: Self = Self {
        value: None,
        state: CellState::Empty,
    };

    /// True when the cell holds a value.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Idealized timestamp grid partitioned into non-overlapping segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Nominal step between consecutive grid points inside a segment.
    pub step_seconds: i64,
    /// Segments in chronological order.
    pub segments: Vec<Span>,
    /// Grid timestamps in ascending order.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Index into `segments` for each entry of `timestamps`.
    pub segment_of: Vec<usize>,
}

impl Grid {
    /// Number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when the grid has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Cells of a single variable, aligned with the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Variable name.
    pub name: String,
    /// One cell per grid point.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Values without provenance.
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.cells.iter().map(|c| c.value)
    }
}

/// Grid plus one column per requested variable, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Grid the columns are aligned with.
    pub grid: Grid,
    /// Columns in the order the variables were requested.
    pub columns: Vec<Column>,
}

impl Frame {
    /// Number of rows (grid points).
    #[must_use]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// True when the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Look up a column by variable name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Value of `name` at row `row`, if present.
    #[must_use]
    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name)?.cells.get(row)?.value
    }

    /// Materialize the frame as a row-oriented series.
    ///
    /// Every row carries an entry for every column; cells without a value map to `None`.
    #[must_use]
    pub fn to_series(&self) -> Series {
        let samples = self
            .grid
            .timestamps
            .iter()
            .enumerate()
            .map(|(row, &ts)| Sample {
                ts,
                values: self
                    .columns
                    .iter()
                    .map(|c| (c.name.clone(), c.cells[row].value))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect();
        Series::from_sorted(samples)
    }
}
