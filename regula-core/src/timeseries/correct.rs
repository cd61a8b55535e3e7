use std::collections::{BTreeMap, BTreeSet};

use crate::timeseries::stats::{mean_abs_step, pearson};
use crate::{Cell, CellState, Column, ErrorKind, FailureRecord, Frame, RegulaConfig};

/// Per-variable statistics the correction pass compares against.
///
/// - `avg_variation`: mean absolute step over pairs spaced exactly one nominal
///   interval apart.
/// - `correlates`: for each variable, the other variables whose Pearson
///   correlation magnitude lies strictly between the threshold and 1.0,
///   sorted by name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Baseline {
    avg_variation: BTreeMap<String, f64>,
    correlates: BTreeMap<String, Vec<String>>,
}

impl Baseline {
    /// Compute the baseline of every column in `frame`.
    #[must_use]
    pub fn fit(frame: &Frame, correlation_threshold: f64) -> Self {
        let ts = &frame.grid.timestamps;
        let values: Vec<(&str, Vec<Option<f64>>)> = frame
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.values().collect()))
            .collect();

        let avg_variation: BTreeMap<String, f64> = values
            .iter()
            .map(|(name, v)| {
                (
                    (*name).to_string(),
                    mean_abs_step(ts, v, frame.grid.step_seconds),
                )
            })
            .collect();

        let mut correlates: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (i, (a, va)) in values.iter().enumerate() {
            for (b, vb) in values.iter().skip(i + 1) {
                let Some(r) = pearson(va, vb) else {
                    continue;
                };
                let r = r.abs();
                if r > correlation_threshold && r < 1.0 {
                    correlates
                        .entry((*a).to_string())
                        .or_default()
                        .push((*b).to_string());
                    correlates
                        .entry((*b).to_string())
                        .or_default()
                        .push((*a).to_string());
                }
            }
        }
        for list in correlates.values_mut() {
            list.sort();
        }

        Self {
            avg_variation,
            correlates,
        }
    }

    /// Average step of `name`; `0.0` for unknown variables or constant signals.
    #[must_use]
    pub fn avg_variation(&self, name: &str) -> f64 {
        self.avg_variation.get(name).copied().unwrap_or(0.0)
    }

    /// Strong correlates of `name`, sorted by name.
    #[must_use]
    pub fn correlates(&self, name: &str) -> &[String] {
        self.correlates.get(name).map_or(&[], Vec::as_slice)
    }
}

/// Output of a correction pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Corrected {
    /// Frame with implausible values replaced.
    pub frame: Frame,
    /// One record per replaced value, in scan order.
    pub failures: Vec<FailureRecord>,
}

/// Detects and replaces implausible values in a filled frame.
///
/// Rows are scanned in order; each present value is compared with its
/// predecessor in the same segment as already corrected, so corrections carry
/// forward. The first matching check wins:
///
/// 1. variation: `|v[i] - v[i-1]| > variation_factor * avg` → `v[i-1]`
/// 2. negative: `v[i] < 0` for a variable not allowed to be negative → `0`
/// 3. inconsistency: the value implied by a strong correlate's ratio at
///    `i-1` differs by more than `inconsistency_factor * avg` → implied value
///
/// Variables with zero baseline variation skip checks 1 and 3. The first row
/// of each segment has no predecessor and only gets the negative check.
///
/// A cell is corrected at most once, including across passes: cells already
/// in the `Corrected` state are never checked again. Within a row the
/// variables are re-swept in request order until a sweep corrects nothing, so
/// every value left alone has been checked against its row's final values.
/// Running [`correct_with`](Self::correct_with) again on its own output with
/// the same baseline therefore reports no failures.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyCorrector {
    negative_allowed: BTreeSet<String>,
    variation_factor: f64,
    inconsistency_factor: f64,
    correlation_threshold: f64,
    ratio_epsilon: f64,
}

impl AnomalyCorrector {
    /// Build a corrector from configuration and the variables that may go negative.
    pub fn new<I, S>(config: &RegulaConfig, negative_allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            negative_allowed: negative_allowed.into_iter().map(Into::into).collect(),
            variation_factor: config.variation_factor,
            inconsistency_factor: config.inconsistency_factor,
            correlation_threshold: config.correlation_threshold,
            ratio_epsilon: config.ratio_epsilon,
        }
    }

    /// Compute the baseline for `frame` with this corrector's correlation threshold.
    #[must_use]
    pub fn fit(&self, frame: &Frame) -> Baseline {
        Baseline::fit(frame, self.correlation_threshold)
    }

    /// Fit a baseline on `frame` and correct it.
    #[must_use]
    pub fn correct(&self, frame: &Frame) -> Corrected {
        let baseline = self.fit(frame);
        self.correct_with(&baseline, frame)
    }

    /// Correct `frame` against a previously computed baseline.
    #[must_use]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "regula_core::correct",
            skip(self, baseline, frame),
            fields(rows = frame.len(), columns = frame.columns.len()),
        )
    )]
    pub fn correct_with(&self, baseline: &Baseline, frame: &Frame) -> Corrected {
        #[cfg(feature = "tracing")]
        for c in &frame.columns {
            if baseline.avg_variation(&c.name) <= 0.0 {
                tracing::debug!(
                    variable = %c.name,
                    "zero baseline variation; skipping variation and consistency checks"
                );
            }
        }

        let index: BTreeMap<&str, usize> = frame
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.as_str(), i))
            .collect();
        let mut cells: Vec<Vec<Cell>> = frame.columns.iter().map(|c| c.cells.clone()).collect();
        let mut failures: Vec<FailureRecord> = Vec::new();

        for row in 0..frame.len() {
            let opens_segment =
                row == 0 || frame.grid.segment_of[row] != frame.grid.segment_of[row - 1];
            loop {
                let mut corrected_any = false;
                for (ci, column) in frame.columns.iter().enumerate() {
                    let cell = cells[ci][row];
                    let Some(cur) = cell.value else {
                        continue;
                    };
                    if cell.state == CellState::Corrected {
                        continue;
                    }
                    let verdict = if opens_segment {
                        self.forbids_negative(&column.name, cur)
                            .then_some((0.0, ErrorKind::Negative))
                    } else {
                        let Some(prev) = cells[ci][row - 1].value else {
                            continue;
                        };
                        self.check(&Reading {
                            name: &column.name,
                            prev,
                            cur,
                            row,
                            baseline,
                            cells: &cells,
                            index: &index,
                        })
                    };
                    if let Some((expected, kind)) = verdict {
                        failures.push(FailureRecord {
                            ts: frame.grid.timestamps[row],
                            variable: column.name.clone(),
                            original_value: cur,
                            expected_value: expected,
                            kind,
                        });
                        cells[ci][row] = Cell {
                            value: Some(expected),
                            state: CellState::Corrected,
                        };
                        corrected_any = true;
                    }
                }
                if !corrected_any {
                    break;
                }
            }
        }

        #[cfg(feature = "tracing")]
        if !failures.is_empty() {
            tracing::debug!(failures = failures.len(), "values corrected");
        }

        let columns = frame
            .columns
            .iter()
            .zip(cells)
            .map(|(c, cells)| Column {
                name: c.name.clone(),
                cells,
            })
            .collect();
        Corrected {
            frame: Frame {
                grid: frame.grid.clone(),
                columns,
            },
            failures,
        }
    }

    fn forbids_negative(&self, name: &str, v: f64) -> bool {
        v < 0.0 && !self.negative_allowed.contains(name)
    }

    fn check(&self, p: &Reading<'_>) -> Option<(f64, ErrorKind)> {
        let avg = p.baseline.avg_variation(p.name);

        if avg > 0.0 && (p.cur - p.prev).abs() > self.variation_factor * avg {
            return Some((p.prev, ErrorKind::Variation));
        }

        if self.forbids_negative(p.name, p.cur) {
            return Some((0.0, ErrorKind::Negative));
        }

        if avg > 0.0 {
            for other in p.baseline.correlates(p.name) {
                let Some(&oi) = p.index.get(other.as_str()) else {
                    continue;
                };
                let (Some(prev_o), Some(cur_o)) =
                    (p.cells[oi][p.row - 1].value, p.cells[oi][p.row].value)
                else {
                    continue;
                };
                let ratio = if prev_o.abs() < self.ratio_epsilon || prev_o == 0.0 {
                    0.0
                } else {
                    p.prev / prev_o
                };
                let expected = ratio * cur_o;
                if expected != 0.0
                    && expected.is_finite()
                    && (p.cur - expected).abs() > self.inconsistency_factor * avg
                {
                    return Some((expected, ErrorKind::Inconsistency));
                }
            }
        }

        None
    }
}

/// Everything a single (row, variable) check needs to look at.
struct Reading<'a> {
    name: &'a str,
    prev: f64,
    cur: f64,
    row: usize,
    baseline: &'a Baseline,
    cells: &'a [Vec<Cell>],
    index: &'a BTreeMap<&'a str, usize>,
}
