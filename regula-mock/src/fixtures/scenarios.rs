use regula_types::Sample;

use crate::at;

pub fn by_name(name: &str) -> Option<Vec<Sample>> {
    match name {
        // Ten readings at 60s, a clean ramp.
        "steady" => Some(build(60, 10, |i| vec![("temp", Some(10.0 + i as f64))])),
        // Same cadence; row 5 is absent between 10.0 and 12.0.
        "single-nan" => Some(build(60, 10, |i| {
            let v = if i == 5 { f64::NAN } else { 6.0 + i as f64 };
            vec![("temp", Some(v))]
        })),
        "large-gap" => Some(large_gap()),
        // Alternating 20/21 with a single 95 spike at row 75; the mean
        // absolute 60s step over the whole series is exactly 2.0.
        "spike" => Some(build(60, 149, |i| {
            let v = if i == 75 {
                95.0
            } else if i % 2 == 0 {
                20.0
            } else {
                21.0
            };
            vec![("temp", Some(v))]
        })),
        "negative-flow" => Some(build(60, 10, |i| {
            let v = [4.0, 5.0, 4.0, 5.0, -3.0, 5.0, 4.0, 5.0, 4.0, 5.0][i];
            vec![("flow", Some(v))]
        })),
        // power tracks 2 * current except row 6, which reads 52 instead of 32.
        "correlated" => Some(build(60, 12, |i| {
            let current = 10.0 + i as f64;
            let power = if i == 6 { 52.0 } else { 2.0 * current };
            vec![("current", Some(current)), ("power", Some(power))]
        })),
        // hum is absent at row 0 and rows 4..=9; only rows 6 and 7 have both
        // donors closer than five minutes.
        "holes" => Some(build(60, 15, |i| {
            let temp = if i % 2 == 0 { 20.0 } else { 20.5 };
            let hum = if i == 0 || (4..=9).contains(&i) {
                None
            } else {
                Some(50.0 + i as f64)
            };
            vec![("temp", Some(temp)), ("hum", hum)]
        })),
        _ => None,
    }
}

/// Six readings at 60s, a 20-minute silence, then six more at 60s.
fn large_gap() -> Vec<Sample> {
    let offsets = (0..6).map(|i| i * 60).chain((0..6).map(|i| 1500 + i * 60));
    offsets
        .enumerate()
        .map(|(i, secs)| {
            let v = if i % 2 == 0 { 10.0 } else { 10.5 };
            Sample::new(at(secs)).with("temp", v)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn build<F>(step: i64, n: usize, values: F) -> Vec<Sample>
where
    F: Fn(usize) -> Vec<(&'static str, Option<f64>)>,
{
    (0..n)
        .map(|i| {
            let secs = step * i64::try_from(i).unwrap_or(i64::MAX / step);
            values(i)
                .into_iter()
                .fold(Sample::new(at(secs)), |s, (name, v)| s.with(name, v))
        })
        .collect()
}
