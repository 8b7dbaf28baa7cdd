//! Generator configuration from `admingen.yaml`.
//!
//! Values are resolved with precedence: CLI flag > environment
//! (`ADMINGEN_ENTITIES`, `ADMINGEN_FORMAT`, `ADMINGEN_PRETTY`) > config file > default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_FILE: &str = "admingen.yaml";
pub const ENV_ENTITIES: &str = "ADMINGEN_ENTITIES";
pub const ENV_FORMAT: &str = "ADMINGEN_FORMAT";
pub const ENV_PRETTY: &str = "ADMINGEN_PRETTY";

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_yaml::Error },
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config file {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config file {}: {}", path.display(), source)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Output encoding of the generated configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Ndjson,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "ndjson" => Ok(OutputFormat::Ndjson),
            _ => Err(ConfigError::InvalidValue {
                key: "format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Ndjson => "ndjson",
        };
        f.write_str(s)
    }
}

fn default_entities() -> PathBuf {
    PathBuf::from("entities")
}

/// Resolved generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding entity metadata documents
    #[serde(default = "default_entities")]
    pub entities: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entities: default_entities(),
            format: OutputFormat::default(),
            pretty: false,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub entities: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub pretty: Option<bool>,
}

impl GeneratorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config file and layer environment and CLI overrides on top.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);

        tracing::debug!(
            "Resolved config: entities={}, format={}, pretty={}",
            config.entities.display(),
            config.format,
            config.pretty
        );

        Ok(config)
    }

    /// Apply environment values, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(entities) = lookup(ENV_ENTITIES) {
            self.entities = PathBuf::from(entities);
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format.parse()?;
        }

        if let Some(pretty) = lookup(ENV_PRETTY) {
            self.pretty = parse_bool(ENV_PRETTY, &pretty)?;
        }

        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(entities) = overrides.entities {
            self.entities = entities;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(pretty) = overrides.pretty {
            self.pretty = pretty;
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
