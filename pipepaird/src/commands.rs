//! Command-line surface

use crate::{ConfigError, HostConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run producer/consumer pairs connected by pipes
#[derive(Debug, Parser)]
#[command(name = "pipepaird", version)]
pub struct Cli {
    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Pause between producer sends, in milliseconds
    #[arg(long, value_name = "MS")]
    pub send_delay_ms: Option<u64>,

    /// Values each producer sends
    #[arg(long, value_name = "N")]
    pub values_per_pair: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// One producer sending 1..=5 to one consumer
    Basic,
    /// Several independent pairs with disjoint value ranges
    Pairs {
        /// Number of pairs
        #[arg(default_value_t = 2)]
        count: usize,
    },
}

impl Cli {
    /// Resolves the effective config: file (or defaults), then flags
    pub fn host_config(&self) -> Result<HostConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => HostConfig::load(path)?,
            None => HostConfig::default(),
        };
        if self.json {
            config.json = true;
        }
        if let Some(delay) = self.send_delay_ms {
            config.roles.send_delay_ms = delay;
        }
        if let Some(values) = self.values_per_pair {
            config.roles.values_per_pair = values;
        }
        config.validate()?;
        Ok(config)
    }
}
