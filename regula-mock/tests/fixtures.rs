use regula_mock::{JitterSpec, SCENARIOS, at, by_name, jittered};

#[test]
fn every_scenario_resolves_and_is_sorted() {
    for name in SCENARIOS {
        let samples = by_name(name).unwrap_or_else(|| panic!("scenario {name} missing"));
        assert!(samples.len() >= 2, "{name} too short");
        assert!(
            samples.windows(2).all(|w| w[0].ts < w[1].ts),
            "{name} not strictly increasing"
        );
    }
    assert!(by_name("nope").is_none());
}

#[test]
fn spike_fixture_has_exactly_one_spike() {
    let s = by_name("spike").unwrap();
    let spikes: Vec<_> = s
        .iter()
        .filter(|x| x.value("temp").is_some_and(|v| v > 21.0))
        .collect();
    assert_eq!(spikes.len(), 1);
    assert_eq!(spikes[0].ts, at(75 * 60));
}

#[test]
fn jittered_is_reproducible() {
    let spec = JitterSpec::default();
    let a = jittered(7, &spec);
    let b = jittered(7, &spec);
    assert_eq!(a, b);
    assert!(a.len() <= spec.len);
    assert!(a.windows(2).all(|w| w[0].ts < w[1].ts));
}

#[test]
fn different_seeds_differ() {
    let spec = JitterSpec::default();
    assert_ne!(jittered(1, &spec), jittered(2, &spec));
}
