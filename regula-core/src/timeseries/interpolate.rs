use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{Cell, CellState, Column, Frame, Grid};

/// Output of [`interpolate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated {
    /// Frame with every empty cell either interpolated or marked missing.
    pub frame: Frame,
    /// Grid timestamps where at least one variable stayed missing, ascending and unique.
    pub missing: Vec<DateTime<Utc>>,
}

/// Index of the nearest present cell at or before each row, within the row's segment.
fn nearest_before(grid: &Grid, cells: &[Cell]) -> Vec<Option<usize>> {
    let mut out = Vec::with_capacity(cells.len());
    let mut last: Option<usize> = None;
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 && grid.segment_of[i] != grid.segment_of[i - 1] {
            last = None;
        }
        if cell.is_present() {
            last = Some(i);
        }
        out.push(last);
    }
    out
}

/// Index of the nearest present cell at or after each row, within the row's segment.
fn nearest_after(grid: &Grid, cells: &[Cell]) -> Vec<Option<usize>> {
    let mut out = vec![None; cells.len()];
    let mut next: Option<usize> = None;
    for i in (0..cells.len()).rev() {
        if i + 1 < cells.len() && grid.segment_of[i] != grid.segment_of[i + 1] {
            next = None;
        }
        if cells[i].is_present() {
            next = Some(i);
        }
        out[i] = next;
    }
    out
}

fn minutes_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let secs = (b - a).num_seconds() as f64;
    secs / 60.0
}

fn fill_column(grid: &Grid, column: &Column, short_gap_minutes: f64) -> Column {
    let before = nearest_before(grid, &column.cells);
    let after = nearest_after(grid, &column.cells);
    let ts = &grid.timestamps;

    let cells = column
        .cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if cell.is_present() {
                return *cell;
            }
            // Donors only come from cells present before filling, never from
            // values interpolated in this pass.
            let donors = before[i].zip(after[i]);
            let filled = donors.and_then(|(pi, ni)| {
                let p = minutes_between(ts[pi], ts[i]);
                let n = minutes_between(ts[i], ts[ni]);
                if p < short_gap_minutes && n < short_gap_minutes && p + n > 0.0 {
                    let prev = column.cells[pi].value?;
                    let next = column.cells[ni].value?;
                    Some(prev + (next - prev) * p / (p + n))
                } else {
                    None
                }
            });
            match filled {
                Some(v) => Cell {
                    value: Some(v),
                    state: CellState::Interpolated,
                },
                None => Cell {
                    value: None,
                    state: CellState::Missing,
                },
            }
        })
        .collect();

    Column {
        name: column.name.clone(),
        cells,
    }
}

/// Fill empty cells with a time-weighted estimate from their nearest present
/// neighbors in the same segment.
///
/// With `p` minutes back to the previous value and `n` minutes forward to the
/// next, a cell is filled with `prev + (next - prev) * p / (p + n)` when both
/// `p` and `n` are strictly below `short_gap_minutes`. Otherwise, and at
/// segment edges, the cell is marked missing and its timestamp recorded.
/// Variables are filled independently.
///
/// ```
/// use regula_core::{interpolate, regularize, Sample, Series};
/// use chrono::DateTime;
///
/// let t = |s| DateTime::from_timestamp(s, 0).unwrap();
/// let series = Series::from_samples(vec![
///     Sample::new(t(0)).with("temp", 10.0),
///     Sample::new(t(60)).with("temp", None),
///     Sample::new(t(120)).with("temp", 12.0),
/// ]).unwrap();
/// let vars = vec!["temp".to_string()];
/// let reg = regularize(&series, &vars, 60, 5.0).unwrap();
/// let out = interpolate(&reg.frame, 5.0);
/// assert_eq!(out.frame.value(1, "temp"), Some(11.0));
/// assert!(out.missing.is_empty());
/// ```
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "regula_core::interpolate",
        skip(frame),
        fields(rows = frame.len(), columns = frame.columns.len()),
    )
)]
pub fn interpolate(frame: &Frame, short_gap_minutes: f64) -> Interpolated {
    let columns: Vec<Column> = frame
        .columns
        .iter()
        .map(|c| fill_column(&frame.grid, c, short_gap_minutes))
        .collect();

    let missing: BTreeSet<DateTime<Utc>> = columns
        .iter()
        .flat_map(|c| {
            c.cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.state == CellState::Missing)
                .map(|(i, _)| frame.grid.timestamps[i])
        })
        .collect();

    #[cfg(feature = "tracing")]
    if !missing.is_empty() {
        tracing::debug!(missing = missing.len(), "grid points left unfilled");
    }

    Interpolated {
        frame: Frame {
            grid: frame.grid.clone(),
            columns,
        },
        missing: missing.into_iter().collect(),
    }
}
