//! Driver configuration loaded from a JSON file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the user's home directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".acm-filter.json";

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub format: OutputFormat,
    /// Strip quotes from values when printing.
    pub unquote_values: bool,
    /// Colour diagnostics on stderr.
    pub color: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            unquote_values: false,
            color: true,
        }
    }
}

impl DriverConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::Missing { path: path_ref.to_path_buf() });
        }

        let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_ref.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path_ref.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist. Otherwise the home-directory file is used
    /// if present, and the defaults if not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::info!("Using config file: {}", path.display());
            return Self::from_json_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                log::info!("Using config file: {}", path.display());
                Self::from_json_file(path)
            }
            _ => {
                log::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `$HOME/.acm-filter.json`
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_CONFIG_FILE))
}
