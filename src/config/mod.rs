//! Configuration loading and validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    ColourError, GridParams, TeamDirectory, TeamEntry, DEFAULT_CELL_SIZE, DEFAULT_MINUTE_CUTOFF,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl From<ColourError> for ConfigError {
    fn from(err: ColourError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Heatmap defaults applied when a request leaves a parameter out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Bucket edge length in pitch units
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,

    /// Minute cutoff when none is given
    #[serde(default = "default_minute_cutoff")]
    pub minute_cutoff: i32,
}

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

fn default_minute_cutoff() -> i32 {
    DEFAULT_MINUTE_CUTOFF
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            minute_cutoff: default_minute_cutoff(),
        }
    }
}

impl HeatmapConfig {
    /// Grid parameters seeded from these defaults.
    pub fn base_params(&self) -> GridParams {
        GridParams::default()
            .with_cell_size(self.cell_size)
            .with_minute_cutoff(self.minute_cutoff)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub heatmap: HeatmapConfig,

    #[serde(default)]
    pub server: ServerConfig,

    /// Per-team acronym and colour overrides, keyed by team name
    #[serde(default)]
    pub teams: BTreeMap<String, TeamEntry>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            heatmap: HeatmapConfig::default(),
            server: ServerConfig::default(),
            teams: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.heatmap
            .base_params()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        self.team_directory()?;
        Ok(())
    }

    /// Team lookup table: built-in defaults overlaid with `[teams]` entries.
    pub fn team_directory(&self) -> Result<TeamDirectory, ConfigError> {
        Ok(TeamDirectory::with_overrides(&self.teams)?)
    }
}
