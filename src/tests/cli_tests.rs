//! Command-line parsing and edit application.

use crate::{apply_edits, parse_args, Args};
use world_clock_lib::config::ClockConfig;
use world_clock_lib::engine::ClockEngine;

fn args(raw: &[&str]) -> anyhow::Result<Args> {
    parse_args(raw.iter().map(|s| s.to_string()))
}

#[test]
fn no_arguments_means_defaults() {
    assert_eq!(args(&[]).unwrap(), Args::default());
}

#[test]
fn flags_and_values_are_parsed() {
    let parsed = args(&[
        "--config", "clock.toml", "--once", "--inline", "--12h", "--ticks", "5", "--add",
        "Japan", "--add", "Europe/Paris", "--remove", "UTC",
    ])
    .unwrap();

    assert_eq!(parsed.config.as_deref(), Some("clock.toml"));
    assert!(parsed.once);
    assert!(parsed.inline);
    assert!(parsed.hour12);
    assert!(!parsed.json);
    assert_eq!(parsed.ticks, Some(5));
    assert_eq!(parsed.add, vec!["Japan", "Europe/Paris"]);
    assert_eq!(parsed.remove, vec!["UTC"]);
}

#[test]
fn missing_value_is_an_error() {
    let err = args(&["--search"]).unwrap_err();
    assert!(err.to_string().contains("--search expects a value"));
}

#[test]
fn bad_tick_count_is_an_error() {
    assert!(args(&["--ticks", "many"]).is_err());
}

#[test]
fn unknown_argument_is_an_error() {
    assert!(args(&["--stdout"]).is_err());
}

#[test]
fn edits_resolve_countries_and_skip_invalid_zones() {
    let engine = ClockEngine::new(&ClockConfig::default()).unwrap();
    let parsed = args(&[
        "--add", "japan", "--add", "Europe/Paris", "--add", "Not/AZone", "--add", "Nigeria",
        "--remove", "UTC", "--12h",
    ])
    .unwrap();

    apply_edits(&engine, &parsed);

    let labels: Vec<_> = engine.zones().into_iter().map(|z| z.label).collect();
    assert_eq!(labels, vec!["Lagos", "Japan", "Paris"]);
    assert!(engine.options().hour12);
}
