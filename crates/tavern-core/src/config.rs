//! Configuration loading and typed config structures for the Tavern runtime.
//!
//! The canonical configuration lives in `tavern-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and provides a loader that reads the file. Range validation
//! happens where the values are consumed: the visitor scheduler rejects an
//! empty spawn-delay window at construction, so a bad file fails the
//! startup rather than hanging a spawn loop.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level tavern configuration.
///
/// Mirrors the structure of `tavern-config.yaml`. All fields have
/// defaults, so a missing file or a partial file is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TavernConfig {
    /// Game pacing and population settings.
    #[serde(default)]
    pub game: GameConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TavernConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Game pacing and population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Random seed for reproducible seat picks and spawn cadence.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Day length: seconds from dawn until night falls.
    #[serde(default = "default_seconds_to_night_starts")]
    pub seconds_to_night_starts: u64,

    /// Maximum visitors in the tavern at once.
    #[serde(default = "default_max_visitors")]
    pub max_visitors: usize,

    /// Lower bound of the spawn cadence delay, in seconds (inclusive).
    #[serde(default = "default_visitors_spawn_delay_min")]
    pub visitors_spawn_delay_min: u64,

    /// Upper bound of the spawn cadence delay, in seconds (exclusive).
    ///
    /// The delay is drawn from the half-open window `[min, max)`, so
    /// `min == max` is an empty window and rejected at startup.
    #[serde(default = "default_visitors_spawn_delay_max")]
    pub visitors_spawn_delay_max: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            seconds_to_night_starts: default_seconds_to_night_starts(),
            max_visitors: default_max_visitors(),
            visitors_spawn_delay_min: default_visitors_spawn_delay_min(),
            visitors_spawn_delay_max: default_visitors_spawn_delay_max(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_seconds_to_night_starts() -> u64 {
    120
}

const fn default_max_visitors() -> usize {
    10
}

const fn default_visitors_spawn_delay_min() -> u64 {
    2
}

const fn default_visitors_spawn_delay_max() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_owned()
}
