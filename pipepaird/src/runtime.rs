//! # Host Runtime
//!
//! Drives the coordinator for the two operator-facing runs and shapes the
//! result for display.

use crate::{Command, ConfigError, HostConfig};
use core_types::PairId;
use serde::Serialize;
use services_logger::{LogEntry, LogLevel};
use services_process_manager::{
    DescriptorError, PairDescriptor, ProcessManager, ProcessManagerError, TerminationReport,
};
use std::collections::BTreeMap;
use thiserror::Error;
use worker_roles::{FaultPlan, SequenceRoles};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pair layout error: {0}")]
    Layout(#[from] DescriptorError),

    #[error("Coordinator error: {0}")]
    ProcessManager(#[from] ProcessManagerError),
}

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// One entry per worker, in spawn order
    pub terminations: TerminationReport,
    /// Final consumer sums, by pair
    pub pair_sums: BTreeMap<PairId, i64>,
}

impl RunReport {
    fn new(terminations: TerminationReport) -> Self {
        let pair_sums = terminations.pair_sums();
        Self {
            terminations,
            pair_sums,
        }
    }

    /// Checks if every worker exited normally with code 0
    pub fn all_normal(&self) -> bool {
        self.terminations.all_normal()
    }

    /// Final sum reported by a pair's consumer
    pub fn sum_for(&self, pair_id: PairId) -> Option<i64> {
        self.pair_sums.get(&pair_id).copied()
    }
}

/// Host runtime
pub struct HostRuntime {
    config: HostConfig,
    faults: FaultPlan,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostConfig) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self {
            config,
            faults: FaultPlan::new(),
        })
    }

    /// Injects faults into the workers of later runs
    pub fn with_fault_plan(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    /// Runs a parsed command
    pub fn run(&self, command: Command) -> Result<RunReport, HostError> {
        match command {
            Command::Basic => self.run_basic_demo(),
            Command::Pairs { count } => self.run_multiple_pairs(count),
        }
    }

    /// One pair: pair 0, values starting at 1
    pub fn run_basic_demo(&self) -> Result<RunReport, HostError> {
        LogEntry::info(format!(
            "Parent process (PID: {}) creating children...",
            std::process::id()
        ))
        .emit();

        let mut manager = self.manager();
        manager.spawn_pair(&PairDescriptor::new(PairId::new(0), 1))?;

        let report = TerminationReport::new(manager.collect_all()?);
        for line in report.role_lines() {
            LogEntry::info(line).emit();
        }
        Ok(RunReport::new(report))
    }

    /// `num_pairs` isolated pairs, numbered from 1, with adjacent ranges
    pub fn run_multiple_pairs(&self, num_pairs: usize) -> Result<RunReport, HostError> {
        LogEntry::info(format!(
            "Parent creating {} producer-consumer pairs...",
            num_pairs
        ))
        .emit();

        let pairs = PairDescriptor::sequence(num_pairs, self.config.roles.values_per_pair)?;
        let mut manager = self.manager();
        for pair in pairs {
            LogEntry::info(format!("=== Pair {} ===", pair.pair_id.get()))
                .with_field("start", pair.start_value)
                .emit();
            manager.spawn_pair(&pair)?;
        }

        let report = TerminationReport::new(manager.collect_all()?);
        for line in report.child_lines() {
            LogEntry::info(line).emit();
        }
        if report.all_normal() {
            LogEntry::info("All pairs completed successfully!").emit();
        } else {
            LogEntry::new(LogLevel::Warn, "Some workers did not exit cleanly").emit();
        }
        Ok(RunReport::new(report))
    }

    fn manager(&self) -> ProcessManager {
        ProcessManager::new(
            SequenceRoles::new(self.config.roles.clone()).with_fault_plan(self.faults.clone()),
        )
    }
}

/// Runs the single-pair demo with `config`
pub fn run_basic_demo(config: &HostConfig) -> Result<RunReport, HostError> {
    HostRuntime::new(config.clone())?.run_basic_demo()
}

/// Runs `num_pairs` pairs with `config`
pub fn run_multiple_pairs(num_pairs: usize, config: &HostConfig) -> Result<RunReport, HostError> {
    HostRuntime::new(config.clone())?.run_multiple_pairs(num_pairs)
}
