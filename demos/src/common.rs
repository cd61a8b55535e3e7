use regula::{CorrectionReport, Regula, Sample};
use regula_mock::{JitterSpec, jittered};

/// Samples for a demo: the named fixture, or a jittered series when
/// `REGULA_DEMO_SEED` is set to a number.
///
/// # Panics
/// Panics if `name` is not a known fixture.
#[must_use]
pub fn load(name: &str) -> Vec<Sample> {
    if let Some(seed) = std::env::var("REGULA_DEMO_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        println!("--- (Using jittered series, seed {seed}) ---");
        return jittered(seed, &JitterSpec::default());
    }
    regula_mock::by_name(name).unwrap_or_else(|| panic!("unknown fixture {name}"))
}

/// Print a one-line summary of a report followed by its failure log.
pub fn print_summary(engine: &Regula, label: &str, report: &CorrectionReport) {
    println!(
        "{label:<14} | interval {:>4}s{} | segments {:>2} | rows {:>4} | missing {:>3} | failures {:>2}",
        report.interval_seconds,
        if report.interval_fallback { "*" } else { " " },
        report.segments.len(),
        report.series.len(),
        report.missing_timestamps.len(),
        report.failures.len(),
    );
    for row in engine.failure_rows(report) {
        println!(
            "    {} {:<8} {:>8.3} -> {:>8.3} ({})",
            row.date, row.variable, row.original_value, row.expected_value, row.error_type
        );
    }
}
