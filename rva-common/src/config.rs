//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::locations::LocationWhitelist;
use crate::{Error, Result};

/// Port used when neither flag, environment nor config file sets one
pub const DEFAULT_PORT: u16 = 8000;

/// Seed dataset used when neither flag, environment nor config file sets one
pub const DEFAULT_DATA_FILE: &str = "data/reviews.csv";

/// Settings read from a TOML config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    /// Replaces the built-in location whitelist
    pub locations: Option<Vec<String>>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub data_file: PathBuf,
    pub locations: LocationWhitelist,
}

/// Overrides taken from the command line (or its environment fallbacks)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve configuration from overrides, config file and defaults
    ///
    /// An explicitly named config file must exist. The per-user default
    /// location is only read when present.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let file = match overrides.config_file.as_deref() {
            Some(path) => load_config_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => load_config_file(&path)?,
                None => FileConfig::default(),
            },
        };
        Self::merge(overrides, file)
    }

    fn merge(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let locations = match file.locations {
            Some(list) if list.iter().all(|l| l.is_empty()) => {
                return Err(Error::Config(
                    "locations must contain at least one non-empty entry".to_string(),
                ));
            }
            Some(list) => LocationWhitelist::new(list.into_iter().filter(|l| !l.is_empty())),
            None => LocationWhitelist::default(),
        };

        Ok(Self {
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            data_file: overrides
                .data_file
                .or(file.data_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            locations,
        })
    }
}

/// Per-user config file path for the platform (`<config_dir>/rva/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rva").join("config.toml"))
}

/// Read and parse a TOML config file
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    parse_config(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
}

fn parse_config(content: &str) -> std::result::Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}
