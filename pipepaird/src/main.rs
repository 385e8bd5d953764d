//! # PipePair Host Daemon
//!
//! Main entry point for running producer/consumer pairs.

use clap::Parser;
use pipepaird::{Cli, HostRuntime};
use std::process;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = cli.host_config().unwrap_or_else(|e| {
        log::error!("{}", e);
        process::exit(1);
    });
    let json = config.json;

    let runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        log::error!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    let report = match runtime.run(cli.command) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Run failed: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                log::error!("Failed to encode report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", report.terminations);
    }
}
