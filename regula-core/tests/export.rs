use std::collections::BTreeMap;

use regula_core::{
    RegulaConfig, failure_rows, format_timestamp, missing_lines, parse_timestamp,
    regularize_and_correct, samples_from_records, series_rows,
};
use regula_mock::{at, by_name};
use serde_json::json;

#[test]
fn failure_rows_use_lowercase_error_type() {
    let report = regularize_and_correct(
        by_name("spike").unwrap(),
        &["temp".to_string()],
        &[],
        &RegulaConfig::default(),
    )
    .unwrap();
    let rows = failure_rows(&report.failures, None);
    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!([{
            "date": "2024-01-01 01:15:00",
            "variable": "temp",
            "original_value": 95.0,
            "expected_value": 20.0,
            "error_type": "variation",
        }])
    );
}

#[test]
fn series_rows_flatten_values_and_keep_missing_as_null() {
    let report = regularize_and_correct(
        by_name("holes").unwrap(),
        &["hum".to_string(), "temp".to_string()],
        &[],
        &RegulaConfig::default(),
    )
    .unwrap();
    let rows = series_rows(&report.series, None);
    assert_eq!(rows.len(), 15);
    assert_eq!(
        serde_json::to_value(&rows[0]).unwrap(),
        json!({"date": "2024-01-01 00:00:00", "hum": null, "temp": 20.0})
    );
    assert_eq!(
        serde_json::to_value(&rows[6]).unwrap(),
        json!({"date": "2024-01-01 00:06:00", "hum": 56.0, "temp": 20.0})
    );

    let lines = missing_lines(&report.missing_timestamps, None);
    assert_eq!(
        lines,
        [
            "2024-01-01 00:00:00",
            "2024-01-01 00:04:00",
            "2024-01-01 00:05:00",
            "2024-01-01 00:08:00",
            "2024-01-01 00:09:00",
        ]
    );
}

#[test]
fn timezone_round_trips_through_ingest_and_export() {
    let tz = chrono_tz::Europe::Madrid;
    let values = BTreeMap::from([("v".to_string(), Some(1.0))]);
    let ingested = samples_from_records(
        vec![
            ("2024-07-01 12:00:00", values.clone()),
            ("2024-07-01 12:01:00", values),
        ],
        Some(tz),
    );
    assert_eq!(ingested.dropped, 0);
    // Summer time: UTC+2.
    assert_eq!(
        ingested.samples[0].ts,
        parse_timestamp("2024-07-01 10:00:00", None).unwrap()
    );
    assert_eq!(
        format_timestamp(ingested.samples[0].ts, Some(tz)),
        "2024-07-01 12:00:00"
    );
    assert_eq!(format_timestamp(at(0), None), "2024-01-01 00:00:00");
}
