mod common;

use common::temp_config;
use mvu_kit::config::{Config, ConfigError, ConfigStore, DemoConfig, LoggingConfig, RuntimeConfig};

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.runtime.skip_unchanged_renders);
    assert_eq!(config.runtime.in_flight_warn_threshold, 64);
    assert_eq!(config.logging.filter, "info");
    assert_eq!(config.demo.latency_ms, 150);
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("mvu-kit/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let (dir, _) = temp_config("");
    let config = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_file_parses() {
    let (_dir, path) = temp_config(
        r#"
[runtime]
skip_unchanged_renders = false
in_flight_warn_threshold = 8

[logging]
filter = "mvu_kit=debug"

[demo]
latency_ms = 20
"#,
    );

    let config = Config::load_from(&path).expect("valid config");
    assert_eq!(
        config,
        Config {
            runtime: RuntimeConfig {
                skip_unchanged_renders: false,
                in_flight_warn_threshold: 8,
            },
            logging: LoggingConfig {
                filter: "mvu_kit=debug".to_string(),
            },
            demo: DemoConfig { latency_ms: 20 },
        }
    );
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config("[runtime]\nin_flight_warn_threshold = 3\n");

    let config = Config::load_from(&path).expect("valid config");
    assert_eq!(config.runtime.in_flight_warn_threshold, 3);
    assert!(config.runtime.skip_unchanged_renders);
    assert_eq!(config.logging, LoggingConfig::default());
    assert_eq!(config.demo, DemoConfig::default());
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = temp_config("[runtime\nskip_unchanged_renders = ");

    match Config::load_from(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_zero_threshold_fails_validation() {
    let (_dir, path) = temp_config("[runtime]\nin_flight_warn_threshold = 0\n");

    match Config::load_from(&path) {
        Err(ConfigError::ValidationError { message }) => {
            assert!(message.contains("in_flight_warn_threshold"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_blank_filter_fails_validation() {
    let (_dir, path) = temp_config("[logging]\nfilter = \"  \"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_store_reload_picks_up_changes() {
    let (_dir, path) = temp_config("[demo]\nlatency_ms = 10\n");
    let store = ConfigStore::open(path.clone()).expect("valid config");
    assert_eq!(store.get().demo.latency_ms, 10);

    std::fs::write(&path, "[demo]\nlatency_ms = 99\n").expect("rewrite config");
    store.reload().expect("reload");

    assert_eq!(store.get().demo.latency_ms, 99);
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_store_reload_failure_keeps_old_config() {
    let (_dir, path) = temp_config("[demo]\nlatency_ms = 10\n");
    let store = ConfigStore::open(path.clone()).expect("valid config");

    std::fs::write(&path, "not = [valid").expect("rewrite config");
    assert!(store.reload().is_err());

    assert_eq!(store.get().demo.latency_ms, 10);
}

#[test]
fn test_store_clones_share_state() {
    let (_dir, path) = temp_config("");
    let store = ConfigStore::open(path.clone()).expect("empty file is valid");
    let other = store.clone();

    std::fs::write(&path, "[logging]\nfilter = \"warn\"\n").expect("rewrite config");
    store.reload().expect("reload");

    assert_eq!(other.get().logging.filter, "warn");
}
