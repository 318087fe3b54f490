//! Configuration file loading
//!
//! Looked up in order: `--config`, `./skywatch.toml`, `./.skywatch.toml`,
//! then `<config dir>/skywatch/config.toml`. No file means defaults.

use serde::{Deserialize, Serialize};
use skywatch_geo::DistanceUnit;
use skywatch_telemetry::TelemetryConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSchema {
    /// Default user position when `--lat/--lon` are not given
    #[serde(default)]
    pub home: Option<HomeConfig>,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default reference position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeConfig {
    pub lat: f64,
    pub lon: f64,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub unit: DistanceUnit,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl LoggingConfig {
    /// Telemetry settings for this logging section. `verbose` forces debug.
    pub fn telemetry(&self, verbose: bool) -> TelemetryConfig {
        TelemetryConfig {
            log_level: if verbose { "debug".to_string() } else { self.level.clone() },
            json: self.json,
            ..TelemetryConfig::default()
        }
    }
}

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations
    ///
    /// An explicit path that does not exist is an error; missing files in the
    /// standard locations are not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Configured home position, if any
    pub fn home(&self) -> (Option<f64>, Option<f64>) {
        match self.schema.home {
            Some(home) => (Some(home.lat), Some(home.lon)),
            None => (None, None),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = ["skywatch.toml", ".skywatch.toml"]
        .into_iter()
        .map(PathBuf::from);
    let user = dirs::config_dir().map(|dir| dir.join("skywatch").join("config.toml"));

    local.chain(user).find(|candidate| candidate.is_file())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_config(content: &str) -> Result<ConfigSchema, toml::de::Error> {
    toml::from_str(content)
}
