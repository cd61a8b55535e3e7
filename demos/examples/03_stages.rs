use regula::stages::{estimate_interval, interpolate, regularize};
use regula::{AnomalyCorrector, RegulaConfig, Series};
use regula_demos::common::load;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Run the pipeline one stage at a time to inspect intermediate results.
    let cfg = RegulaConfig::default();
    let vars = vec!["temp".to_string()];
    let series = Series::from_samples(load("spike"))?;

    let interval = estimate_interval(&series, cfg.default_interval_seconds)?;
    println!(
        "1. interval: {}s (fallback: {})",
        interval.seconds, interval.fallback
    );

    let reg = regularize(&series, &vars, interval.seconds, cfg.large_gap_minutes)?;
    println!(
        "2. grid: {} points in {} segment(s), {} off-grid sample(s)",
        reg.frame.len(),
        reg.frame.grid.segments.len(),
        reg.off_grid_samples
    );

    let filled = interpolate(&reg.frame, cfg.short_gap_minutes);
    println!("3. missing after fill: {}", filled.missing.len());

    let corrector = AnomalyCorrector::new(&cfg, Vec::<String>::new());
    let baseline = corrector.fit(&filled.frame);
    println!(
        "4. baseline avg step for temp: {:.3}",
        baseline.avg_variation("temp")
    );
    let once = corrector.correct_with(&baseline, &filled.frame);
    let twice = corrector.correct_with(&baseline, &once.frame);
    println!(
        "5. corrections: {} on first pass, {} on second",
        once.failures.len(),
        twice.failures.len()
    );
    Ok(())
}
