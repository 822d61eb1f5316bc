//! Integration tests for dino-config crate.

use dino_common::test_utils::{config_fixtures::minimal_config_toml, create_temp_dir};
use dino_common::{Granularity, LogFormat};
use dino_config::{Config, ConfigLoader};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.api.user_agent = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_minimal_file_fills_defaults() {
    let dir = create_temp_dir();
    let path = dir.path().join("dino-pageviews.toml");
    std::fs::write(&path, minimal_config_toml()).unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();

    assert_eq!(config.request.start, "2015070100");
    assert_eq!(config.request.end, "2016010100");
    assert_eq!(config.request.project, "en.wikipedia.org");
    assert_eq!(config.request.granularity, Granularity::Monthly);
    assert_eq!(config.throttle.interval(), Duration::from_millis(8));
    assert_eq!(config.plots.width, 1670);
}

#[test]
fn test_full_file_parses_every_section() {
    let dir = create_temp_dir();
    let path = dir.path().join("custom.toml");
    std::fs::write(
        &path,
        r#"
[api]
endpoint = "http://localhost:8080/pageviews/"
user_agent = "tests <tests@example.org>"
timeout_secs = 5

[request]
project = "de.wikipedia.org"
agent = "all-agents"
granularity = "daily"
start = "2020010100"
end = "2020020100"

[throttle]
requests_per_second = 50
assumed_latency_ms = 0

[paths]
articles_csv = "genera.csv"
data_dir = "out/data"
image_dir = "out/img"

[plots]
width = 800
height = 600
top_k = 5

[logging]
level = "debug"
format = "pretty"
file = "logs/fetch.log"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();

    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.request.project, "de.wikipedia.org");
    assert_eq!(config.request.granularity, Granularity::Daily);
    assert_eq!(config.throttle.interval(), Duration::from_millis(20));
    assert_eq!(config.paths.image_dir, PathBuf::from("out/img"));
    assert_eq!(config.plots.top_k, 5);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.logging.file.as_deref(), Some("logs/fetch.log"));
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = create_temp_dir();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[plots]\ntop_k = 0\n").unwrap();

    assert!(ConfigLoader::load_from_file(&path).is_err());
}

#[test]
fn test_malformed_toml_is_rejected() {
    let dir = create_temp_dir();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[api\nuser_agent = ").unwrap();

    assert!(ConfigLoader::load_from_file(&path).is_err());
}

#[test]
fn test_save_then_load() {
    let dir = create_temp_dir();
    let path = dir.path().join("nested").join("saved.toml");

    let mut config = Config::default();
    config.plots.top_k = 3;
    config.paths.data_dir = PathBuf::from("elsewhere");

    ConfigLoader::save(&config, &path).unwrap();
    let loaded = ConfigLoader::load_from_file(&path).unwrap();

    assert_eq!(loaded.plots.top_k, 3);
    assert_eq!(loaded.paths.data_dir, PathBuf::from("elsewhere"));
}
