//! Deterministic fixture series for CI-safe tests and demos.
//!
//! Each named scenario is a small, hand-built series that exercises one
//! behavior of the pipeline (steady cadence, a fillable hole, a large gap, a
//! spike, a negative reading, a correlated pair, unfillable holes). The
//! [`jittered`] generator produces larger noisy series from a seed.
use chrono::{DateTime, Utc};
use regula_types::Sample;

mod fixtures;

pub use fixtures::noisy::{JitterSpec, jittered};

/// Names accepted by [`by_name`].
pub const SCENARIOS: &[&str] = &[
    "steady",
    "single-nan",
    "large-gap",
    "spike",
    "negative-flow",
    "correlated",
    "holes",
];

/// Start instant shared by all fixtures: 2024-01-01 00:00:00 UTC.
#[must_use]
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

/// Instant `secs` seconds after [`base_time`].
#[must_use]
pub fn at(secs: i64) -> DateTime<Utc> {
    base_time() + chrono::TimeDelta::seconds(secs)
}

/// Samples of a named scenario, or `None` for an unknown name.
#[must_use]
pub fn by_name(name: &str) -> Option<Vec<Sample>> {
    fixtures::scenarios::by_name(name)
}
