use std::collections::BTreeMap;

use regula::Regula;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A meter log in Madrid local time, with an unreadable row, a hole and a
    // negative flow reading.
    let raw = [
        ("2024-02-01 08:00:00", Some(12.0), Some(4.0)),
        ("2024-02-01 08:01:00", Some(12.5), Some(4.5)),
        ("2024-02-01 08:02:00", None, Some(4.0)),
        ("2024-02-01 08:03:00", Some(13.5), Some(-2.0)),
        ("01/02/2024 8:04", Some(14.0), Some(4.5)),
        ("2024-02-01 08:05:00", Some(14.5), Some(4.0)),
        ("2024-02-01 08:06:00", Some(15.0), Some(4.5)),
    ];
    let records = raw.iter().map(|(date, temp, flow)| {
        let values = BTreeMap::from([
            ("temp".to_string(), *temp),
            ("flow".to_string(), *flow),
        ]);
        (*date, values)
    });

    let engine = Regula::builder()
        .variables(["temp", "flow"])
        .timezone(chrono_tz::Europe::Madrid)
        .build()?;
    let out = engine.run_records(records)?;
    println!("dropped records: {}", out.dropped_records);

    println!("\n## Corrected series");
    println!("date,flow,temp");
    for row in engine.series_rows(&out.report) {
        let cell = |k: &str| {
            row.values
                .get(k)
                .copied()
                .flatten()
                .map_or_else(String::new, |v| format!("{v}"))
        };
        println!("{},{},{}", row.date, cell("flow"), cell("temp"));
    }

    println!("\n## Missing timestamps");
    for line in engine.missing_lines(&out.report) {
        println!("{line}");
    }

    println!("\n## Failures (JSON lines)");
    for row in engine.failure_rows(&out.report) {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}
