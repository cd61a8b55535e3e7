use assert_cmd::prelude::*;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::process::Command;

/// Every numbered demo and a line its stdout must contain.
const DEMOS: &[(&str, &str)] = &[
    // Only logs, and those are off unless RUST_LOG enables them.
    ("00_tracing", ""),
    ("01_scenarios", "## Fixture scenarios"),
    ("02_records_export", "dropped records: 1"),
    ("03_stages", "5. corrections:"),
];

/// Demos that read their input through `common::load`.
const SEEDABLE: &[&str] = &["00_tracing", "01_scenarios", "03_stages"];

fn numbered_demo_files() -> BTreeSet<String> {
    fs::read_dir("examples")
        .expect("demos crate has an examples/ dir")
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension() == Some(OsStr::new("rs")))
        .filter_map(|p| p.file_stem().and_then(OsStr::to_str).map(str::to_string))
        .filter(|n| n.starts_with(|c: char| c.is_ascii_digit()))
        .collect()
}

fn run_demo(name: &str, seed: Option<u64>) -> String {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut cmd = Command::new(cargo);
    cmd.args(["run", "--quiet", "--example", name]);
    match seed {
        Some(seed) => cmd.env("REGULA_DEMO_SEED", seed.to_string()),
        None => cmd.env_remove("REGULA_DEMO_SEED"),
    };
    let out = cmd.assert().success();
    String::from_utf8_lossy(&out.get_output().stdout).into_owned()
}

#[test]
fn every_demo_file_is_listed() {
    let listed: BTreeSet<String> = DEMOS.iter().map(|(n, _)| (*n).to_string()).collect();
    assert_eq!(numbered_demo_files(), listed);
}

#[test]
fn demos_run_on_fixtures() {
    for (name, marker) in DEMOS {
        let stdout = run_demo(name, None);
        assert!(stdout.contains(marker), "{name}: expected {marker:?} in\n{stdout}");
        assert!(!stdout.contains("jittered series"), "{name} ignored the fixtures");
    }
}

#[test]
fn seedable_demos_switch_to_jittered_series() {
    for name in SEEDABLE {
        let stdout = run_demo(name, Some(42));
        assert!(
            stdout.contains("Using jittered series, seed 42"),
            "{name} did not pick up REGULA_DEMO_SEED:\n{stdout}"
        );
    }
}
