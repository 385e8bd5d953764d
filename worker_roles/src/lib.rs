//! # Worker Roles
//!
//! This crate defines the behaviors a worker can run.
//!
//! ## Philosophy
//!
//! Roles are pluggable business logic. They own exactly one channel endpoint,
//! never see the coordinator, and report back only through their return
//! value. A role that returns an error is a failed worker; the host maps
//! that to a nonzero exit code.
//!
//! ## Roles
//!
//! - [`SequenceProducer`]: sends consecutive integers, then closes its endpoint
//! - [`SummingConsumer`]: sums integers until end-of-stream

#[cfg(test)]
mod captured_log;
pub mod config;
pub mod consumer;
pub mod factory;
pub mod fault_injection;
pub mod producer;

pub use config::RoleConfig;
pub use consumer::SummingConsumer;
pub use factory::{RoleFactory, SequenceRoles};
pub use fault_injection::{FaultInjector, FaultPlan, RoleFault};
pub use producer::SequenceProducer;

use core_types::{PairId, WorkerId};
use ipc::{ChannelError, ReadEndpoint, WriteEndpoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which side of a pair a worker plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Producer,
    Consumer,
}

impl RoleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleKind::Producer => "Producer",
            RoleKind::Consumer => "Consumer",
        }
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a role reports when it finishes cleanly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleSummary {
    /// Producer sent `sent` records
    Produced { sent: usize },
    /// Consumer received `count` records adding up to `sum`
    Consumed { count: usize, sum: i64 },
}

/// Identity a role runs under, for log attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerContext {
    pub worker_id: WorkerId,
    pub pair_id: PairId,
}

impl WorkerContext {
    pub fn new(worker_id: WorkerId, pair_id: PairId) -> Self {
        Self { worker_id, pair_id }
    }
}

/// Errors that end a role body
#[derive(Debug, Error)]
pub enum RoleError {
    #[error("Transport failure: {0}")]
    Transport(#[from] ChannelError),

    #[error("Short write: transferred {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("Value range starting at {start} with {count} values does not fit in i32")]
    ValueRange { start: i32, count: usize },
}

/// Producer side of a pair
///
/// Receives the write endpoint only. Dropping or closing it is how the
/// producer signals it is done.
pub trait Producer: Send {
    fn run(
        self: Box<Self>,
        endpoint: WriteEndpoint,
        ctx: &WorkerContext,
    ) -> Result<RoleSummary, RoleError>;
}

/// Consumer side of a pair
pub trait Consumer: Send {
    fn run(
        self: Box<Self>,
        endpoint: ReadEndpoint,
        ctx: &WorkerContext,
    ) -> Result<RoleSummary, RoleError>;
}
