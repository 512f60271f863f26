//! Configuration loading utilities for CLI commands

use crate::cli::Cli;
use anyhow::{Context, Result};
use relatos_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "relatos.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_file(cli.config.as_deref()) {
        tracing::debug!(path = %path.display(), "Loading configuration file");
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides(cli));
    Ok(config)
}

/// An explicit `--config` must exist; the implicit one is optional
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            implicit.is_file().then_some(implicit)
        }
    }
}

fn overrides(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        center: cli.center,
        radius_km: cli.radius_km,
        reporters_file: cli.reporters_file.clone(),
        reports_file: cli.reports_file.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use relatos_core::config::ConfigSource;
    use relatos_core::models::Coordinate;
    use serial_test::serial;
    use std::env;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_env() {
        for var in [
            "RELATOS_CENTER",
            "RELATOS_RADIUS_KM",
            "RELATOS_REPORTERS_FILE",
            "RELATOS_REPORTS_FILE",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_cli_flags_override_config_file() {
        clear_env();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "radius_km = 5.0\ncenter = [-22.9, -43.17]").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "relatos",
            "--config",
            &path,
            "--radius-km",
            "20",
            "status",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();

        assert_eq!(config.radius_km.value, 20.0);
        assert_eq!(config.radius_km.source, ConfigSource::Cli);
        assert_eq!(config.center.value, Coordinate::new(-22.9, -43.17));
        assert_eq!(config.center.source, ConfigSource::File);
    }

    #[test]
    #[serial]
    fn test_environment_sits_between_file_and_flags() {
        clear_env();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "center = [-22.9, -43.17]").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        env::set_var("RELATOS_CENTER", "-15.78,-47.93");

        let cli = Cli::try_parse_from(["relatos", "--config", &path, "status"]).unwrap();
        let config = load_config(&cli).unwrap();
        clear_env();

        assert_eq!(config.center.value, Coordinate::new(-15.78, -47.93));
        assert_eq!(config.center.source, ConfigSource::Environment);
    }

    #[test]
    fn test_explicit_missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "relatos",
            "--config",
            "/definitely/not/here/relatos.toml",
            "status",
        ])
        .unwrap();

        assert!(load_config(&cli).is_err());
    }
}
