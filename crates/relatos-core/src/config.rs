use crate::error::{RelatosError, Result};
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Central point used when nothing else is configured (São Paulo)
pub const DEFAULT_CENTER: Coordinate = Coordinate { lat: -23.55, lon: -46.63 };

/// Acceptance radius around the central point, in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

pub const DEFAULT_REPORTERS_FILE: &str = "relatores.json";
pub const DEFAULT_REPORTS_FILE: &str = "dados.json";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Settings a registry is opened with. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySettings {
    pub center: Coordinate,
    pub radius_km: f64,
    pub reporters_file: PathBuf,
    pub reports_file: PathBuf,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        LayeredConfig::with_defaults().settings()
    }
}

/// Layered configuration for the registry
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub center: ConfigValue<Coordinate>,
    pub radius_km: ConfigValue<f64>,
    pub reporters_file: ConfigValue<PathBuf>,
    pub reports_file: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            center: ConfigValue::new(DEFAULT_CENTER, ConfigSource::Default),
            radius_km: ConfigValue::new(DEFAULT_RADIUS_KM, ConfigSource::Default),
            reporters_file: ConfigValue::new(
                PathBuf::from(DEFAULT_REPORTERS_FILE),
                ConfigSource::Default,
            ),
            reports_file: ConfigValue::new(
                PathBuf::from(DEFAULT_REPORTS_FILE),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RelatosError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| RelatosError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(center) = file_config.center {
            let center = Coordinate::from(center);
            if !center.is_finite() {
                return Err(RelatosError::ConfigInvalid {
                    key: "center".to_string(),
                    reason: format!("Center must be finite decimal degrees, got {}", center),
                });
            }
            self.center.update(center, ConfigSource::File);
        }

        if let Some(radius_km) = file_config.radius_km {
            self.radius_km.update(check_radius(radius_km)?, ConfigSource::File);
        }

        if let Some(reporters_file) = file_config.reporters_file {
            self.reporters_file.update(reporters_file, ConfigSource::File);
        }

        if let Some(reports_file) = file_config.reports_file {
            self.reports_file.update(reports_file, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // RELATOS_CENTER
        if let Ok(center_str) = env::var("RELATOS_CENTER") {
            match parse_center(&center_str) {
                Ok(center) => self.center.update(center, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid RELATOS_CENTER value '{}': expected \"lat,long\"",
                    center_str
                ),
            }
        }

        // RELATOS_RADIUS_KM
        if let Ok(radius_str) = env::var("RELATOS_RADIUS_KM") {
            match parse_radius(&radius_str) {
                Ok(radius_km) => self.radius_km.update(radius_km, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid RELATOS_RADIUS_KM value '{}': expected a positive number",
                    radius_str
                ),
            }
        }

        if let Ok(path) = env::var("RELATOS_REPORTERS_FILE") {
            self.reporters_file.update(PathBuf::from(path), ConfigSource::Environment);
        }

        if let Ok(path) = env::var("RELATOS_REPORTS_FILE") {
            self.reports_file.update(PathBuf::from(path), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(center) = overrides.center {
            self.center.update(center, ConfigSource::Cli);
        }

        if let Some(radius_km) = overrides.radius_km {
            self.radius_km.update(radius_km, ConfigSource::Cli);
        }

        if let Some(reporters_file) = overrides.reporters_file {
            self.reporters_file.update(reporters_file, ConfigSource::Cli);
        }

        if let Some(reports_file) = overrides.reports_file {
            self.reports_file.update(reports_file, ConfigSource::Cli);
        }
    }

    /// Resolve the effective settings
    pub fn settings(&self) -> RegistrySettings {
        RegistrySettings {
            center: self.center.value,
            radius_km: self.radius_km.value,
            reporters_file: self.reporters_file.value.clone(),
            reports_file: self.reports_file.value.clone(),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert("center".to_string(), (self.center.value.to_string(), self.center.source));

        map.insert(
            "radius_km".to_string(),
            (self.radius_km.value.to_string(), self.radius_km.source),
        );

        map.insert(
            "reporters_file".to_string(),
            (self.reporters_file.value.display().to_string(), self.reporters_file.source),
        );

        map.insert(
            "reports_file".to_string(),
            (self.reports_file.value.display().to_string(), self.reports_file.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    center: Option<[f64; 2]>,
    radius_km: Option<f64>,
    reporters_file: Option<PathBuf>,
    reports_file: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub center: Option<Coordinate>,
    pub radius_km: Option<f64>,
    pub reporters_file: Option<PathBuf>,
    pub reports_file: Option<PathBuf>,
}

/// Parse a central point from "lat,long"
pub fn parse_center(s: &str) -> Result<Coordinate> {
    let invalid = || RelatosError::ConfigInvalid {
        key: "center".to_string(),
        reason: format!("Invalid center: {}. Use \"lat,long\" in decimal degrees", s),
    };

    let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    let center = Coordinate::new(lat, lon);
    if !center.is_finite() {
        return Err(invalid());
    }
    Ok(center)
}

/// Parse an acceptance radius in kilometers
pub fn parse_radius(s: &str) -> Result<f64> {
    let radius_km: f64 = s.trim().parse().map_err(|_| RelatosError::ConfigInvalid {
        key: "radius_km".to_string(),
        reason: format!("Invalid radius: {}. Use a number of kilometers", s),
    })?;
    check_radius(radius_km)
}

fn check_radius(radius_km: f64) -> Result<f64> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(RelatosError::ConfigInvalid {
            key: "radius_km".to_string(),
            reason: format!("Radius must be a positive number of kilometers, got {}", radius_km),
        })
    }
}
