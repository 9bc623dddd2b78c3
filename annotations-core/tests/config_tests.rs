//! Integration tests for configuration loading
//!
//! Tests that manipulate XDG_CONFIG_HOME are marked with #[serial] so they
//! don't race each other on the process environment.

use annotations_core::config::{load_toml_config, ConfigOverrides, ServiceConfig, TomlConfig};
use annotations_core::Error;
use serial_test::serial;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_explicit_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
port = 9090
env = "test"
cache_duration = "2h45m"
fixture_path = "/srv/annotations.json"
"#,
    )
    .unwrap();

    let toml = load_toml_config(Some(path.as_path())).unwrap();
    assert_eq!(toml.port, Some(9090));
    assert_eq!(toml.env.as_deref(), Some("test"));
    assert_eq!(toml.log_level, None);

    let config = ServiceConfig::resolve(ConfigOverrides::default(), toml).unwrap();
    assert_eq!(config.port, 9090);
    assert_eq!(config.cache_duration, Duration::from_secs(9900));
    assert_eq!(config.cache_control_header(), "max-age=9900, public");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.fixture_path, Some(PathBuf::from("/srv/annotations.json")));
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_toml_config(Some(dir.path().join("absent.toml").as_path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    assert!(matches!(load_toml_config(Some(path.as_path())), Err(Error::Toml(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let toml = load_toml_config(None).unwrap();
    assert_eq!(toml, TomlConfig::default());

    std::env::remove_var("XDG_CONFIG_HOME");
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_is_used_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("public-annotations");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "log_level = \"debug\"\n").unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let toml = load_toml_config(None).unwrap();
    assert_eq!(toml.log_level.as_deref(), Some("debug"));

    std::env::remove_var("XDG_CONFIG_HOME");
}
