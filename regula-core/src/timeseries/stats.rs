use chrono::{DateTime, Utc};

/// Mean absolute step between consecutive values whose timestamps are
/// exactly `step_seconds` apart.
///
/// Pairs where either value is absent, or whose spacing differs from the
/// nominal step, are ignored. Returns `0.0` when no pair qualifies.
#[must_use]
pub fn mean_abs_step(
    timestamps: &[DateTime<Utc>],
    values: &[Option<f64>],
    step_seconds: i64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 1..values.len().min(timestamps.len()) {
        if (timestamps[i] - timestamps[i - 1]).num_seconds() != step_seconds {
            continue;
        }
        if let (Some(a), Some(b)) = (values[i - 1], values[i]) {
            sum += (b - a).abs();
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = count as f64;
    sum / n
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns `None` with fewer than two complete pairs, when either side has
/// zero variance, or when the result is not finite.
#[must_use]
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for &(a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then_some(r)
}
