use regula::{Regula, RegulaConfig, RegulaError};

#[test]
fn build_requires_variables() {
    let err = Regula::builder().build().unwrap_err();
    assert!(matches!(err, RegulaError::InvalidArg(_)));
}

#[test]
fn build_validates_thresholds() {
    for builder in [
        Regula::builder().variables(["t"]).large_gap_minutes(0.0),
        Regula::builder().variables(["t"]).short_gap_minutes(f64::NAN),
        Regula::builder().variables(["t"]).default_interval_seconds(0),
        Regula::builder().variables(["t"]).variation_factor(-1.0),
        Regula::builder().variables(["t"]).inconsistency_factor(0.0),
        Regula::builder().variables(["t"]).correlation_threshold(1.0),
        Regula::builder().variables(["t"]).ratio_epsilon(-1e-9),
    ] {
        assert!(matches!(builder.build(), Err(RegulaError::InvalidArg(_))));
    }
}

#[test]
fn setters_land_in_config() {
    let engine = Regula::builder()
        .variables(["a"])
        .variables(["b"])
        .negative_allowed(["b"])
        .large_gap_minutes(10.0)
        .short_gap_minutes(2.0)
        .default_interval_seconds(30)
        .variation_factor(4.0)
        .inconsistency_factor(2.5)
        .correlation_threshold(0.8)
        .ratio_epsilon(1e-6)
        .timezone(chrono_tz::UTC)
        .build()
        .unwrap();

    assert_eq!(engine.variables(), ["a", "b"]);
    assert_eq!(engine.negative_allowed(), ["b"]);
    assert_eq!(engine.timezone(), Some(chrono_tz::UTC));
    assert_eq!(
        engine.config(),
        &RegulaConfig {
            large_gap_minutes: 10.0,
            short_gap_minutes: 2.0,
            default_interval_seconds: 30,
            variation_factor: 4.0,
            inconsistency_factor: 2.5,
            correlation_threshold: 0.8,
            ratio_epsilon: 1e-6,
        }
    );
}

#[test]
fn whole_config_can_be_supplied() {
    let cfg: RegulaConfig = serde_json::from_str(r#"{"short_gap_minutes": 1.5}"#).unwrap();
    let engine = Regula::builder().config(cfg).variables(["t"]).build().unwrap();
    assert_eq!(engine.config().short_gap_minutes, 1.5);
    assert_eq!(engine.config().large_gap_minutes, 5.0);
}
