use proptest::prelude::*;
use regula::{ErrorKind, Regula, RegulaError};
use regula_mock::{JitterSpec, jittered};

use crate::helpers::{engine, fixture};

#[test]
fn steady_is_untouched() {
    let report = engine(&["temp"]).run(fixture("steady")).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.series.into_samples(), fixture("steady"));
}

#[test]
fn spike_is_flattened() {
    let e = engine(&["temp"]);
    let report = e.run(fixture("spike")).unwrap();
    let rows = e.failure_rows(&report);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2024-01-01 01:15:00");
    assert_eq!(rows[0].error_type, "variation");
}

#[test]
fn negative_allowed_flows_through_builder() {
    let strict = engine(&["flow"]).run(fixture("negative-flow")).unwrap();
    assert_eq!(strict.failures_of(ErrorKind::Negative).count(), 1);

    let lenient = Regula::builder()
        .variables(["flow"])
        .negative_allowed(["flow"])
        .build()
        .unwrap()
        .run(fixture("negative-flow"))
        .unwrap();
    assert!(lenient.is_clean());
}

#[test]
fn variable_order_changes_which_value_is_blamed() {
    let power_first = engine(&["power", "current"]).run(fixture("correlated")).unwrap();
    assert_eq!(power_first.failures.len(), 1);
    assert_eq!(power_first.failures[0].variable, "power");

    let current_first = engine(&["current", "power"]).run(fixture("correlated")).unwrap();
    assert_eq!(current_first.failures[0].variable, "current");
}

#[test]
fn holes_report_missing_lines() {
    let e = engine(&["temp", "hum"]);
    let report = e.run(fixture("holes")).unwrap();
    assert_eq!(e.missing_lines(&report).len(), 5);
    let rows = e.series_rows(&report);
    assert_eq!(rows[0].values.get("hum"), Some(&None));
    assert_eq!(rows[6].values.get("hum"), Some(&Some(56.0)));
}

#[test]
fn unknown_variable_surfaces_before_processing() {
    let err = engine(&["pressure"]).run(fixture("steady")).unwrap_err();
    assert_eq!(err, RegulaError::unknown_variable("pressure"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rerunning_gives_identical_reports(seed in any::<u64>(), flip in any::<bool>()) {
        let vars: &[&str] = if flip { &["flow", "temp"] } else { &["temp", "flow"] };
        let e = engine(vars);
        let input = jittered(seed, &JitterSpec::default());
        let a = e.run(input.clone()).unwrap();
        let mut shuffled = input;
        shuffled.reverse();
        let b = e.run(shuffled).unwrap();
        prop_assert_eq!(a, b);
    }
}
