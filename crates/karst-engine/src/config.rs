//! Configuration loading and typed config structures for the Karst engine.
//!
//! The canonical configuration lives in `karst-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file.

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

/// Top-level engine configuration.
///
/// Mirrors the structure of `karst-config.yaml`. Every field has a
/// default, so a missing file or a partial file is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KarstConfig {
    /// World-level settings (name, tick timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Infrastructure connection strings.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Locations of the registry data files.
    #[serde(default)]
    pub data: DataConfig,

    /// Per-tick stat drain applied to every seeded creature.
    #[serde(default)]
    pub upkeep: UpkeepConfig,

    /// Creatures to seed at engine start.
    #[serde(default)]
    pub spawn: Vec<SpawnEntry>,
}

impl KarstConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for infrastructure URLs:
    /// - `NATS_URL` overrides `infrastructure.nats_url`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.infrastructure.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.infrastructure.apply_env_overrides();
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Infrastructure connection strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// NATS messaging URL.
    #[serde(default = "default_nats_url")]
    pub nats_url: String,
}

impl InfrastructureConfig {
    /// Override infrastructure URLs with environment variables when set.
    ///
    /// This allows Docker Compose (or any deployment) to set connection
    /// strings via env vars without modifying the YAML config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("NATS_URL") {
            self.nats_url = val;
        }
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            nats_url: default_nats_url(),
        }
    }
}

/// Locations of the registry data files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Path to the stat definition file.
    #[serde(default = "default_stats_path")]
    pub stats_path: String,

    /// Path to the creature template file.
    #[serde(default = "default_creatures_path")]
    pub creatures_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stats_path: default_stats_path(),
            creatures_path: default_creatures_path(),
        }
    }
}

/// Per-tick stat drain applied to every seeded creature.
///
/// Creatures whose ledger has no entry for the stat are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpkeepConfig {
    /// Whether the per-tick drain runs.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Stat identifier the drain is applied to.
    #[serde(default = "default_upkeep_stat")]
    pub stat: String,

    /// Amount added to the stat each tick.
    #[serde(default = "default_upkeep_amount")]
    pub amount: i64,
}

impl Default for UpkeepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stat: default_upkeep_stat(),
            amount: default_upkeep_amount(),
        }
    }
}

/// One row of the spawn table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnEntry {
    /// Creature template identifier to spawn from.
    pub template: String,

    /// How many creatures to spawn.
    #[serde(default = "default_spawn_count")]
    pub count: u32,
}

fn default_world_name() -> String {
    String::from("karst-dev")
}

const fn default_tick_interval_ms() -> u64 {
    250
}

fn default_nats_url() -> String {
    String::from("nats://localhost:4222")
}

fn default_stats_path() -> String {
    String::from("data/stats.yaml")
}

fn default_creatures_path() -> String {
    String::from("data/creatures.yaml")
}

fn default_upkeep_stat() -> String {
    String::from("hunger")
}

const fn default_upkeep_amount() -> i64 {
    1
}

const fn default_spawn_count() -> u32 {
    1
}

const fn default_true() -> bool {
    true
}
