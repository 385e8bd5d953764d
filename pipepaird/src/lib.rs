//! # PipePair Host
//!
//! Host-side runtime for PipePair: configuration, the two demo runs, and
//! the command-line surface that drives them.

pub mod commands;
pub mod config;
pub mod runtime;

pub use commands::{Cli, Command};
pub use config::{ConfigError, HostConfig};
pub use runtime::{run_basic_demo, run_multiple_pairs, HostError, HostRuntime, RunReport};
