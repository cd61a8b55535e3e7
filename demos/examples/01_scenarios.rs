use regula::Regula;
use regula_demos::common::{load, print_summary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Each fixture with the variables it exercises.
    let cases: [(&str, &[&str]); 7] = [
        ("steady", &["temp"]),
        ("single-nan", &["temp"]),
        ("large-gap", &["temp"]),
        ("spike", &["temp"]),
        ("negative-flow", &["flow"]),
        ("correlated", &["power", "current"]),
        ("holes", &["temp", "hum"]),
    ];

    println!("## Fixture scenarios (* = default cadence)");
    for (name, vars) in cases {
        let samples = load(name);
        let present: Vec<&str> = vars
            .iter()
            .copied()
            .filter(|v| samples.iter().any(|s| s.values.contains_key(*v)))
            .collect();
        // A jittered series only carries temp/flow.
        let vars = if present.is_empty() { vec!["temp"] } else { present };
        let engine = Regula::builder().variables(vars).build()?;
        let report = engine.run(samples)?;
        print_summary(&engine, name, &report);
    }
    Ok(())
}
