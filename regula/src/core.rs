use std::collections::BTreeMap;

use chrono_tz::Tz;
use regula_core::{
    CorrectionReport, FailureRow, RegulaConfig, RegulaError, Sample, SeriesRow, failure_rows,
    missing_lines, regularize_and_correct, samples_from_records, series_rows,
};

/// Configured batch engine: which variables to clean and how.
#[derive(Debug, Clone, PartialEq)]
pub struct Regula {
    pub(crate) cfg: RegulaConfig,
    pub(crate) variables: Vec<String>,
    pub(crate) negative_allowed: Vec<String>,
    pub(crate) timezone: Option<Tz>,
}

/// Result of [`Regula::run_records`]: the report plus the records that never
/// made it into the series.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsReport {
    /// Output of the pipeline over the parsed records.
    pub report: CorrectionReport,
    /// Records dropped because their date did not parse.
    pub dropped_records: usize,
}

/// Builder for constructing a [`Regula`] engine with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct RegulaBuilder {
    cfg: RegulaConfig,
    variables: Vec<String>,
    negative_allowed: Vec<String>,
    timezone: Option<Tz>,
}

impl RegulaBuilder {
    /// Create a builder with default thresholds and no variables selected.
    ///
    /// At least one variable must be added via [`variables`](Self::variables)
    /// before [`build`](Self::build) succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub const fn config(mut self, cfg: RegulaConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Variables to regularize and correct, in scan order.
    ///
    /// Order matters for correction: within a row, earlier variables are
    /// checked and corrected first, and later ones see those corrections.
    #[must_use]
    pub fn variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables.extend(names.into_iter().map(Into::into));
        self
    }

    /// Variables for which negative readings are legitimate.
    #[must_use]
    pub fn negative_allowed<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negative_allowed
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Time zone used to read naive record dates and to format exported rows.
    ///
    /// Without it, naive dates are read and written as UTC.
    #[must_use]
    pub const fn timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Gaps longer than this split the grid into segments.
    #[must_use]
    pub const fn large_gap_minutes(mut self, minutes: f64) -> Self {
        self.cfg.large_gap_minutes = minutes;
        self
    }

    /// Both donors must be closer than this for a hole to be interpolated.
    #[must_use]
    pub const fn short_gap_minutes(mut self, minutes: f64) -> Self {
        self.cfg.short_gap_minutes = minutes;
        self
    }

    /// Cadence used when no interval repeats in the input.
    #[must_use]
    pub const fn default_interval_seconds(mut self, seconds: i64) -> Self {
        self.cfg.default_interval_seconds = seconds;
        self
    }

    /// Multiple of the average step above which a jump is a variation error.
    #[must_use]
    pub const fn variation_factor(mut self, factor: f64) -> Self {
        self.cfg.variation_factor = factor;
        self
    }

    /// Multiple of the average step above which a ratio mismatch is an inconsistency.
    #[must_use]
    pub const fn inconsistency_factor(mut self, factor: f64) -> Self {
        self.cfg.inconsistency_factor = factor;
        self
    }

    /// Correlation magnitude a pair must exceed to be checked for consistency.
    #[must_use]
    pub const fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.cfg.correlation_threshold = threshold;
        self
    }

    /// Correlate readings smaller than this in magnitude yield a zero ratio.
    #[must_use]
    pub const fn ratio_epsilon(mut self, epsilon: f64) -> Self {
        self.cfg.ratio_epsilon = epsilon;
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no variables were selected or the configuration
    /// fails [`RegulaConfig::validate`].
    pub fn build(self) -> Result<Regula, RegulaError> {
        if self.variables.is_empty() {
            return Err(RegulaError::InvalidArg(
                "no variables selected; add at least one via variables(...)".to_string(),
            ));
        }
        self.cfg.validate()?;
        Ok(Regula {
            cfg: self.cfg,
            variables: self.variables,
            negative_allowed: self.negative_allowed,
            timezone: self.timezone,
        })
    }
}

impl Regula {
    /// Start building a new engine.
    ///
    /// ```
    /// let engine = regula::Regula::builder()
    ///     .variables(["temp", "flow"])
    ///     .negative_allowed(["temp"])
    ///     .variation_factor(4.0)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(engine.variables(), ["temp", "flow"]);
    /// ```
    #[must_use]
    pub fn builder() -> RegulaBuilder {
        RegulaBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RegulaConfig {
        &self.cfg
    }

    /// Selected variables, in scan order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Variables allowed to go negative.
    #[must_use]
    pub fn negative_allowed(&self) -> &[String] {
        &self.negative_allowed
    }

    /// Time zone for naive dates, if any.
    #[must_use]
    pub const fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// Regularize, fill and correct `samples`.
    ///
    /// # Errors
    /// See [`regularize_and_correct`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "regula::run",
            skip(self, samples),
            fields(variables = self.variables.len()),
        )
    )]
    pub fn run<I>(&self, samples: I) -> Result<CorrectionReport, RegulaError>
    where
        I: IntoIterator<Item = Sample>,
    {
        regularize_and_correct(samples, &self.variables, &self.negative_allowed, &self.cfg)
    }

    /// Parse `(date, values)` records in the engine's time zone and run them.
    ///
    /// Records with an unparseable date are skipped and counted in
    /// [`RecordsReport::dropped_records`].
    ///
    /// # Errors
    /// See [`regularize_and_correct`]. A batch with fewer than two parseable
    /// dates is `InsufficientData`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "regula::run_records", skip(self, records))
    )]
    pub fn run_records<I, S>(&self, records: I) -> Result<RecordsReport, RegulaError>
    where
        I: IntoIterator<Item = (S, BTreeMap<String, Option<f64>>)>,
        S: AsRef<str>,
    {
        let ingested = samples_from_records(records, self.timezone);
        #[cfg(feature = "tracing")]
        if ingested.dropped > 0 {
            tracing::warn!(dropped = ingested.dropped, "records with unparseable dates skipped");
        }
        let report = self.run(ingested.samples)?;
        Ok(RecordsReport {
            report,
            dropped_records: ingested.dropped,
        })
    }

    /// Corrected series as table rows, dates in the engine's time zone.
    #[must_use]
    pub fn series_rows(&self, report: &CorrectionReport) -> Vec<SeriesRow> {
        series_rows(&report.series, self.timezone)
    }

    /// Failure log as table rows, dates in the engine's time zone.
    #[must_use]
    pub fn failure_rows(&self, report: &CorrectionReport) -> Vec<FailureRow> {
        failure_rows(&report.failures, self.timezone)
    }

    /// Missing timestamps formatted in the engine's time zone.
    #[must_use]
    pub fn missing_lines(&self, report: &CorrectionReport) -> Vec<String> {
        missing_lines(&report.missing_timestamps, self.timezone)
    }
}
