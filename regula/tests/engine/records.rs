use regula::{Regula, RegulaError};

use crate::helpers::{engine, record};

#[test]
fn bad_dates_are_dropped_and_counted() {
    let out = engine(&["v"])
        .run_records(vec![
            record("2024-01-01 00:00:00", &[("v", Some(1.0))]),
            record("yesterday", &[("v", Some(9.0))]),
            record("2024-01-01 00:01:00", &[("v", None)]),
            record("2024-01-01 00:02:00", &[("v", Some(3.0))]),
        ])
        .unwrap();
    assert_eq!(out.dropped_records, 1);
    assert_eq!(out.report.series.len(), 3);
    assert_eq!(out.report.series.samples()[1].value("v"), Some(2.0));
}

#[test]
fn too_few_parseable_dates_is_insufficient() {
    let err = engine(&["v"])
        .run_records(vec![
            record("2024-01-01 00:00:00", &[("v", Some(1.0))]),
            record("n/a", &[("v", Some(2.0))]),
        ])
        .unwrap_err();
    assert_eq!(err, RegulaError::InsufficientData { found: 1 });
}

#[test]
fn local_dates_round_trip_in_engine_timezone() {
    let e = Regula::builder()
        .variables(["v"])
        .timezone(chrono_tz::Europe::Madrid)
        .build()
        .unwrap();
    let out = e
        .run_records(vec![
            record("2024-02-01 08:00:00", &[("v", Some(1.0))]),
            record("2024-02-01 08:01:00", &[("v", Some(1.5))]),
            record("2024-02-01 08:02:00", &[("v", Some(2.0))]),
        ])
        .unwrap();
    // Winter time in Madrid is UTC+1.
    assert_eq!(
        out.report.series.samples()[0].ts.format("%H:%M").to_string(),
        "07:00"
    );
    let rows = e.series_rows(&out.report);
    assert_eq!(rows[0].date, "2024-02-01 08:00:00");
}
