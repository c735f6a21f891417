//! Simulation configuration, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for starting a new universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Minerals in the stockpile at start.
    pub starting_minerals: i32,
    /// Whether committing a placement charges the structure's mineral cost.
    pub charge_placement_costs: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_minerals: 5000,
            charge_placement_costs: true,
        }
    }
}

impl SimConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
