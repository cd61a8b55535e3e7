use std::collections::BTreeSet;

use crate::timeseries::correct::AnomalyCorrector;
use crate::timeseries::infer::estimate_interval;
use crate::timeseries::interpolate::interpolate;
use crate::timeseries::regularize::regularize;
use crate::{CorrectionReport, RegulaConfig, RegulaError, Sample, Series};

/// Deduplicate `variables` (first occurrence wins) and check every requested
/// name against the input columns.
fn resolve_variables(
    series: &Series,
    variables: &[String],
    negative_allowed: &[String],
) -> Result<Vec<String>, RegulaError> {
    if variables.is_empty() {
        return Err(RegulaError::InvalidArg(
            "no variables requested; select at least one column".into(),
        ));
    }
    let columns = series.columns();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out: Vec<String> = Vec::with_capacity(variables.len());
    for name in variables {
        if !columns.contains(name.as_str()) {
            return Err(RegulaError::unknown_variable(name.clone()));
        }
        if seen.insert(name.as_str()) {
            out.push(name.clone());
        }
    }
    if let Some(name) = negative_allowed
        .iter()
        .find(|n| !columns.contains(n.as_str()))
    {
        return Err(RegulaError::unknown_variable(name.clone()));
    }
    Ok(out)
}

/// Regularize, gap-fill and anomaly-correct a series in one batch.
///
/// Stages run strictly in order: interval inference, grid regularization,
/// interpolation, correction. The result is fully deterministic for a given
/// input and configuration.
///
/// # Errors
/// - `InvalidArg` for an invalid configuration or an empty variable list.
/// - `DuplicateTimestamp` if two samples share a timestamp.
/// - `InsufficientData` with fewer than two samples.
/// - `UnknownVariable` if a requested or negative-allowed variable is absent
///   from the input columns; checked before any processing.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "regula_core::regularize_and_correct",
        skip(samples, variables, negative_allowed, config),
        fields(variables = variables.len()),
    )
)]
pub fn regularize_and_correct<I>(
    samples: I,
    variables: &[String],
    negative_allowed: &[String],
    config: &RegulaConfig,
) -> Result<CorrectionReport, RegulaError>
where
    I: IntoIterator<Item = Sample>,
{
    config.validate()?;
    let series = Series::from_samples(samples)?;
    let input_span = series
        .span()
        .filter(|_| series.len() >= 2)
        .ok_or_else(|| RegulaError::insufficient_data(series.len()))?;
    let variables = resolve_variables(&series, variables, negative_allowed)?;

    let interval = estimate_interval(&series, config.default_interval_seconds)?;
    let regularized = regularize(
        &series,
        &variables,
        interval.seconds,
        config.large_gap_minutes,
    )?;
    let filled = interpolate(&regularized.frame, config.short_gap_minutes);
    let corrector = AnomalyCorrector::new(config, negative_allowed.iter().cloned());
    let corrected = corrector.correct(&filled.frame);

    #[cfg(feature = "tracing")]
    tracing::info!(
        interval_seconds = interval.seconds,
        interval_fallback = interval.fallback,
        segments = corrected.frame.grid.segments.len(),
        rows = corrected.frame.len(),
        missing = filled.missing.len(),
        failures = corrected.failures.len(),
        "series regularized"
    );

    Ok(CorrectionReport {
        series: corrected.frame.to_series(),
        missing_timestamps: filled.missing,
        failures: corrected.failures,
        interval_seconds: interval.seconds,
        interval_fallback: interval.fallback,
        segments: corrected.frame.grid.segments,
        input_span,
        off_grid_samples: regularized.off_grid_samples,
    })
}
