//! Tests for config file resolution and graceful degradation
//!
//! - Missing config files SHALL NOT cause termination
//! - Explicit path beats the environment variable
//! - Malformed files are reported, not silently replaced
//!
//! Tests that manipulate PODCASTR_CONFIG are marked with #[serial] so they
//! never race each other.

use podcastr_common::config::{ConfigResolver, ConfigSource, TomlConfig, CONFIG_ENV_VAR};
use podcastr_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn test_cli_path_is_loaded() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("port = 4100\napi_url = \"http://api.test\"\n");

    let resolver = ConfigResolver::new(Some(file.path().to_path_buf()));
    let config = resolver.resolve().unwrap();

    assert_eq!(config.port, 4100);
    assert_eq!(config.api_url, "http://api.test");
}

#[test]
#[serial]
fn test_cli_path_beats_env_var() {
    let env_file = write_config("port = 5000\n");
    let cli_file = write_config("port = 6000\n");
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let resolver = ConfigResolver::new(Some(cli_file.path().to_path_buf()));
    let config = resolver.resolve().unwrap();
    assert_eq!(config.port, 6000);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_path_is_loaded() {
    let file = write_config("home_limit = 20\n");
    env::set_var(CONFIG_ENV_VAR, file.path());

    let resolver = ConfigResolver::new(None);
    let config = resolver.resolve().unwrap();
    assert_eq!(config.home_limit, 20);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let resolver = ConfigResolver::new(Some(missing));
    let config = resolver.resolve().unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_malformed_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("port = [1, 2]\n");

    let resolver = ConfigResolver::new(Some(file.path().to_path_buf()));
    let err = resolver.resolve().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("home_limit = 0\n");

    let resolver = ConfigResolver::new(Some(file.path().to_path_buf()));
    assert!(resolver.resolve().is_err());
}

#[test]
#[serial]
fn test_source_reports_file_origin() {
    env::remove_var(CONFIG_ENV_VAR);
    let file = write_config("port = 4200\n");
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let found = ConfigResolver::new(Some(file.path().to_path_buf())).source();
    assert_eq!(found, ConfigSource::File(file.path().to_path_buf()));
    assert!(found.to_string().starts_with("Loaded config from "));
    assert_eq!(found.load().unwrap().port, 4200);

    let absent = ConfigResolver::new(Some(missing.clone())).source();
    assert_eq!(absent, ConfigSource::Missing(missing));
    assert!(absent.is_missing());
}
