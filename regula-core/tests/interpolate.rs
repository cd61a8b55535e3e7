use std::collections::BTreeSet;

use proptest::prelude::*;
use regula_core::{CellState, Frame, Sample, Series, interpolate, regularize};
use regula_mock::{JitterSpec, at, jittered};

fn frame(samples: Vec<Sample>, vars: &[&str], step: i64, large_gap_minutes: f64) -> Frame {
    let series = Series::from_samples(samples).unwrap();
    let vars: Vec<String> = vars.iter().map(|s| (*s).to_string()).collect();
    regularize(&series, &vars, step, large_gap_minutes)
        .unwrap()
        .frame
}

#[test]
fn holes_fixture_fills_only_close_donors() {
    let f = frame(regula_mock::by_name("holes").unwrap(), &["temp", "hum"], 60, 5.0);
    let out = interpolate(&f, 5.0);

    assert_eq!(out.frame.value(6, "hum"), Some(56.0));
    assert_eq!(out.frame.value(7, "hum"), Some(57.0));
    let hum = out.frame.column("hum").unwrap();
    assert_eq!(hum.cells[6].state, CellState::Interpolated);
    for row in [0usize, 4, 5, 8, 9] {
        assert_eq!(hum.cells[row].state, CellState::Missing, "row {row}");
        assert_eq!(hum.cells[row].value, None);
    }

    let expected: Vec<_> = [0i64, 4, 5, 8, 9].iter().map(|r| at(r * 60)).collect();
    assert_eq!(out.missing, expected);

    // temp is complete and untouched.
    let temp = out.frame.column("temp").unwrap();
    assert!(temp.cells.iter().all(|c| c.state == CellState::Original));
}

#[test]
fn single_hole_is_linear_midpoint() {
    let f = frame(regula_mock::by_name("single-nan").unwrap(), &["temp"], 60, 5.0);
    let out = interpolate(&f, 5.0);
    assert_eq!(out.frame.value(5, "temp"), Some(11.0));
    assert!(out.missing.is_empty());
}

#[test]
fn donors_never_cross_a_large_gap() {
    // The 60s hole ends its segment; with a generous short-gap limit the
    // value after the gap would otherwise be a valid donor.
    let samples = vec![
        Sample::new(at(0)).with("v", 10.0),
        Sample::new(at(60)).with("v", None),
        Sample::new(at(1_000)).with("v", 20.0),
        Sample::new(at(1_060)).with("v", 21.0),
    ];
    let f = frame(samples, &["v"], 60, 5.0);
    assert_eq!(f.grid.segments.len(), 2);

    let out = interpolate(&f, 100.0);
    assert_eq!(out.frame.value(1, "v"), None);
    assert_eq!(out.missing, vec![at(60)]);
}

#[test]
fn time_weighted_between_uneven_donors() {
    // Grid 0..=240 at 60s; donors at 0 (10.0) and 240 (14.0).
    let samples = vec![
        Sample::new(at(0)).with("v", 10.0),
        Sample::new(at(60)).with("v", None),
        Sample::new(at(240)).with("v", 14.0),
        Sample::new(at(300)).with("v", 14.0),
    ];
    let f = frame(samples, &["v"], 60, 5.0);
    let out = interpolate(&f, 5.0);
    assert_eq!(out.frame.value(1, "v"), Some(11.0));
    assert_eq!(out.frame.value(2, "v"), Some(12.0));
    assert_eq!(out.frame.value(3, "v"), Some(13.0));
}

proptest! {
    #[test]
    fn every_empty_cell_is_resolved(seed in any::<u64>()) {
        let spec = JitterSpec { len: 120, hole_probability: 0.2, ..JitterSpec::default() };
        let f = frame(jittered(seed, &spec), &["temp", "flow"], 10, 5.0);
        let out = interpolate(&f, 0.5);

        prop_assert!(out.missing.windows(2).all(|w| w[0] < w[1]));
        let mut missing_rows = BTreeSet::new();
        for (before, after) in f.columns.iter().zip(&out.frame.columns) {
            for (row, (b, a)) in before.cells.iter().zip(&after.cells).enumerate() {
                prop_assert_ne!(a.state, CellState::Empty);
                if b.is_present() {
                    prop_assert_eq!(a, b);
                } else if a.state == CellState::Missing {
                    missing_rows.insert(out.frame.grid.timestamps[row]);
                } else {
                    prop_assert_eq!(a.state, CellState::Interpolated);
                    prop_assert!(a.value.is_some_and(f64::is_finite));
                }
            }
        }
        prop_assert_eq!(out.missing, missing_rows.into_iter().collect::<Vec<_>>());
    }
}
