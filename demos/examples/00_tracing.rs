use regula::Regula;
use regula_demos::common::load;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Human-friendly subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,regula=trace,regula_core=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let engine = Regula::builder().variables(["temp"]).build()?;
    let report = engine.run(load("spike"))?;
    tracing::info!(
        missing = report.missing_timestamps.len(),
        failures = report.failures.len(),
        "demo finished"
    );

    // Same engine on an irregular series triggers the default-cadence warning.
    let irregular = [0i64, 7, 20, 50, 91].map(|s| {
        regula::Sample::new(regula_mock::at(s)).with("temp", 20.0)
    });
    let report = engine.run(irregular)?;
    tracing::info!(
        interval = report.interval_seconds,
        fallback = report.interval_fallback,
        "irregular input"
    );

    Ok(())
}
