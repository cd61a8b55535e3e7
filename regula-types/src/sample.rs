//! Input rows and the sorted series built from them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegulaError;
use crate::frame::Span;

/// One timestamped row of measurements.
///
/// A variable that is absent from `values`, or present as `None`, has no
/// measurement at this timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Instant of the measurement, second resolution.
    pub ts: DateTime<Utc>,
    /// Measurements keyed by variable name.
    pub values: BTreeMap<String, Option<f64>>,
}

impl Sample {
    /// Create a sample with no measurements.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>) -> Self {
        Self {
            ts,
            values: BTreeMap::new(),
        }
    }

    /// Add or replace a measurement.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Measurement for `name`, if present.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }
}

/// Samples sorted ascending by timestamp, with unique timestamps.
///
/// Non-finite values are normalized to `None` on construction so that an
/// absent measurement is never confused with a number.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from samples in any order.
    ///
    /// # Errors
    /// Returns `DuplicateTimestamp` if two samples share a timestamp.
    pub fn from_samples<I>(samples: I) -> Result<Self, RegulaError>
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut samples: Vec<Sample> = samples.into_iter().collect();
        samples.sort_by_key(|s| s.ts);
        for s in &mut samples {
            for v in s.values.values_mut() {
                if v.is_some_and(|x| !x.is_finite()) {
                    *v = None;
                }
            }
        }
        if let Some(w) = samples.windows(2).find(|w| w[0].ts == w[1].ts) {
            return Err(RegulaError::duplicate_timestamp(w[0].ts));
        }
        Ok(Self { samples })
    }

    /// Wrap samples already known to be sorted, unique and finite-or-`None`.
    pub(crate) const fn from_sorted(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Borrow the sorted samples.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Consume the series and return its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Union of variable names across all samples.
    #[must_use]
    pub fn columns(&self) -> BTreeSet<&str> {
        self.samples
            .iter()
            .flat_map(|s| s.values.keys().map(String::as_str))
            .collect()
    }

    /// Timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.samples.iter().map(|s| s.ts)
    }

    /// Inclusive span from the first to the last sample, if any.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        Some(Span {
            start: first.ts.timestamp(),
            end: last.ts.timestamp(),
        })
    }
}
