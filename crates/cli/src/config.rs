// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # CLI Configuration
//!
//! Settings for the `sproc-call` binary, loaded from an optional YAML file
//! and overridden by command-line flags.
//!
//! ## Example
//!
//! ```yaml
//! catalog: ./procedures.yaml
//! format: json
//! log_filter: sproc_call_parser=debug,warn
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// How the call report is printed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Main CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Static catalog file (YAML or JSON) with declared parameters.
    /// Without one, calls are parsed but not bound.
    pub catalog: Option<PathBuf>,

    /// Output format for the report
    pub format: OutputFormat,

    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            format: OutputFormat::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// A relative `catalog` path is resolved against the config file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config = Self::from_yaml_str(&content)?;
        if let (Some(catalog), Some(dir)) = (config.catalog.as_ref(), path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(dir.join(catalog));
            }
        }
        Ok(config)
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, catalog: Option<PathBuf>, format: Option<OutputFormat>) -> Self {
        if catalog.is_some() {
            self.catalog = catalog;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    /// Validate the configuration
    ///
    /// Checks that the log filter is a valid `tracing` directive list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| ConfigError::InvalidLogFilter {
            filter: self.log_filter.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {message}")]
    ReadFailed { path: String, message: String },

    /// The config file is not valid YAML for [`CliConfig`]
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The log filter does not parse
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}
