//! Host configuration
//!
//! Configuration comes from built-in defaults, optionally overlaid by a JSON
//! file, then by command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use worker_roles::RoleConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Host runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Parameters for every producer and consumer
    pub roles: RoleConfig,
    /// Print the run report as JSON instead of a table
    pub json: bool,
}

impl HostConfig {
    /// Loads a config file, filling missing fields with defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roles.values_per_pair == 0 {
            return Err(ConfigError::Invalid(
                "values_per_pair must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
