// Shared fixtures for engine tests; `use crate::helpers::*;`.
use std::collections::BTreeMap;

use regula::{Regula, Sample};

/// Engine over `vars` with default thresholds.
pub fn engine(vars: &[&str]) -> Regula {
    Regula::builder()
        .variables(vars.iter().copied())
        .build()
        .unwrap()
}

/// Samples of a named `regula-mock` scenario.
pub fn fixture(name: &str) -> Vec<Sample> {
    regula_mock::by_name(name).unwrap_or_else(|| panic!("unknown fixture {name}"))
}

/// One `(date, values)` record as read from a table.
pub fn record(date: &str, values: &[(&str, Option<f64>)]) -> (String, BTreeMap<String, Option<f64>>) {
    (
        date.to_string(),
        values
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect(),
    )
}
