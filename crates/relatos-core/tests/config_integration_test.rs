//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use relatos_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use relatos_core::models::Coordinate;
use relatos_core::RelatosError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 4] = [
    "RELATOS_CENTER",
    "RELATOS_RADIUS_KM",
    "RELATOS_REPORTERS_FILE",
    "RELATOS_REPORTS_FILE",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_partial_file_configuration() {
    let file = config_file(
        r#"
radius_km = 3.0
# Only override the radius, leave others as defaults
"#,
    );

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.radius_km.value, 3.0);
    assert_eq!(config.radius_km.source, ConfigSource::File);
    assert_eq!(config.center.source, ConfigSource::Default);
    assert_eq!(config.reporters_file.source, ConfigSource::Default);
    assert_eq!(config.reports_file.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();

    let file = config_file(
        r#"
center = [-22.90, -43.17]
radius_km = 25.0
"#,
    );

    env::set_var("RELATOS_CENTER", "-15.79,-47.88");
    env::set_var("RELATOS_REPORTS_FILE", "/var/lib/relatos/dados.json");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.center.value, Coordinate::new(-15.79, -47.88));
    assert_eq!(config.center.source, ConfigSource::Environment);
    assert_eq!(config.reports_file.value, PathBuf::from("/var/lib/relatos/dados.json"));
    assert_eq!(config.reports_file.source, ConfigSource::Environment);
    // Not set in the environment, so the file value stands
    assert_eq!(config.radius_km.value, 25.0);
    assert_eq!(config.radius_km.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();

    env::set_var("RELATOS_CENTER", "somewhere");
    env::set_var("RELATOS_RADIUS_KM", "-4");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.center.source, ConfigSource::Default);
    assert_eq!(config.radius_km.value, 10.0);
    assert_eq!(config.radius_km.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();

    let file = config_file("radius_km = 20.0");
    env::set_var("RELATOS_RADIUS_KM", "15");

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();
    assert_eq!(config.radius_km.value, 15.0);

    config.update_from_cli(CliConfigOverrides {
        radius_km: Some(1.5),
        ..Default::default()
    });

    let settings = config.settings();
    assert_eq!(settings.radius_km, 1.5);
    assert_eq!(config.radius_km.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_invalid_toml_file() {
    let file = config_file("radius_km = [not toml");

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(matches!(result, Err(RelatosError::ConfigInvalid { key, .. }) if key == "file"));
}

#[test]
fn test_missing_config_file() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/relatos.toml");
    assert!(result.is_err());
}
