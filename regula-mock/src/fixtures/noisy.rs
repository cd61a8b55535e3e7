use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regula_types::Sample;

use crate::at;

/// Shape of a [`jittered`] series.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterSpec {
    /// Number of candidate readings before drops.
    pub len: usize,
    /// Nominal spacing between readings.
    pub step_seconds: i64,
    /// Probability that a reading lands up to 2s late.
    pub jitter_probability: f64,
    /// Probability that a reading is dropped entirely.
    pub drop_probability: f64,
    /// Probability that a single value within a kept reading is absent.
    pub hole_probability: f64,
    /// Variables to emit; each follows its own bounded random walk.
    pub variables: Vec<String>,
}

impl Default for JitterSpec {
    fn default() -> Self {
        Self {
            len: 200,
            step_seconds: 10,
            jitter_probability: 0.05,
            drop_probability: 0.05,
            hole_probability: 0.02,
            variables: vec!["temp".into(), "flow".into()],
        }
    }
}

/// Reproducible noisy series: same `seed` and `spec`, same samples.
///
/// Timestamps advance by `step_seconds` with occasional late readings and
/// dropped rows; values wander by at most one unit per step around 50.
#[must_use]
pub fn jittered(seed: u64, spec: &JitterSpec) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut level: Vec<f64> = vec![50.0; spec.variables.len()];
    let mut out = Vec::with_capacity(spec.len);
    let mut nominal: i64 = 0;

    for _ in 0..spec.len {
        nominal += spec.step_seconds;
        for l in &mut level {
            *l += rng.random_range(-1.0..=1.0);
        }
        if rng.random_bool(spec.drop_probability) {
            continue;
        }
        let late = if rng.random_bool(spec.jitter_probability) {
            rng.random_range(1..=2)
        } else {
            0
        };
        let mut sample = Sample::new(at(nominal + late));
        for (name, &l) in spec.variables.iter().zip(&level) {
            let v = (!rng.random_bool(spec.hole_probability)).then_some(l);
            sample = sample.with(name.clone(), v);
        }
        out.push(sample);
    }
    out
}
