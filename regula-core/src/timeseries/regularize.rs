use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Cell, Column, Frame, Grid, RegulaError, Sample, Series, Span};

/// Output of [`regularize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Regularized {
    /// Grid with original values joined in and every other cell empty.
    pub frame: Frame,
    /// Input samples whose timestamp did not coincide with a grid point.
    pub off_grid_samples: usize,
}

fn utc(sec: i64) -> Result<DateTime<Utc>, RegulaError> {
    DateTime::from_timestamp(sec, 0)
        .ok_or_else(|| RegulaError::Data(format!("grid timestamp out of range: {sec}")))
}

/// Split the sample timestamps into segments at every gap longer than
/// `large_gap_seconds`.
///
/// Each segment spans one maximal run of normal gaps; a sample isolated
/// between two large gaps yields a single-point segment.
#[must_use]
pub fn segment_spans(ts: &[i64], large_gap_seconds: f64) -> Vec<Span> {
    let Some(&first) = ts.first() else {
        return Vec::new();
    };
    let mut spans: Vec<Span> = Vec::new();
    let mut start = first;
    for w in ts.windows(2) {
        #[allow(clippy::cast_precision_loss)]
        let gap = (w[1] - w[0]) as f64;
        if gap > large_gap_seconds {
            spans.push(Span { start, end: w[0] });
            start = w[1];
        }
    }
    if let Some(&last) = ts.last() {
        spans.push(Span { start, end: last });
    }
    spans
}

/// Build the segmented grid for a sorted series.
///
/// Inside each segment, points run from the segment start at `step_seconds`
/// and the segment end is always included, even when it is off the step
/// lattice. No grid point falls inside a large gap.
///
/// # Errors
/// - `InvalidArg` if `step_seconds` is not positive.
/// - `Data` if a grid timestamp cannot be represented.
pub fn build_grid(
    series: &Series,
    step_seconds: i64,
    large_gap_minutes: f64,
) -> Result<Grid, RegulaError> {
    if step_seconds <= 0 {
        return Err(RegulaError::InvalidArg(format!(
            "grid step must be positive, got {step_seconds}s"
        )));
    }
    let ts: Vec<i64> = series.timestamps().map(|t| t.timestamp()).collect();
    let segments = segment_spans(&ts, large_gap_minutes * 60.0);

    let mut timestamps: Vec<DateTime<Utc>> = Vec::new();
    let mut segment_of: Vec<usize> = Vec::new();
    for (idx, seg) in segments.iter().enumerate() {
        let mut t = seg.start;
        while t < seg.end {
            timestamps.push(utc(t)?);
            segment_of.push(idx);
            t += step_seconds;
        }
        timestamps.push(utc(seg.end)?);
        segment_of.push(idx);
    }

    Ok(Grid {
        step_seconds,
        segments,
        timestamps,
        segment_of,
    })
}

/// Lay a sorted series onto its regular grid.
///
/// Samples are left-joined by exact timestamp; grid points without a sample
/// get an empty cell for every requested variable. Only the requested
/// variables become columns, in request order.
///
/// # Errors
/// Propagates errors from [`build_grid`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "regula_core::regularize",
        skip(series, variables),
        fields(samples = series.len(), variables = variables.len()),
    )
)]
pub fn regularize(
    series: &Series,
    variables: &[String],
    step_seconds: i64,
    large_gap_minutes: f64,
) -> Result<Regularized, RegulaError> {
    let grid = build_grid(series, step_seconds, large_gap_minutes)?;

    let by_ts: BTreeMap<DateTime<Utc>, &Sample> =
        series.samples().iter().map(|s| (s.ts, s)).collect();

    let mut matched = 0usize;
    let rows: Vec<Option<&Sample>> = grid
        .timestamps
        .iter()
        .map(|ts| {
            let hit = by_ts.get(ts).copied();
            if hit.is_some() {
                matched += 1;
            }
            hit
        })
        .collect();

    let columns: Vec<Column> = variables
        .iter()
        .map(|name| Column {
            name: name.clone(),
            cells: rows
                .iter()
                .map(|row| Cell::joined(row.and_then(|s| s.value(name))))
                .collect(),
        })
        .collect();

    let off_grid_samples = series.len().saturating_sub(matched);
    #[cfg(feature = "tracing")]
    if off_grid_samples > 0 {
        tracing::debug!(
            off_grid_samples,
            step_seconds,
            "samples off the grid lattice were not joined"
        );
    }

    Ok(Regularized {
        frame: Frame { grid, columns },
        off_grid_samples,
    })
}
