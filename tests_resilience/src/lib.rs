//! Resilience Test Utilities
//!
//! This crate provides shared utilities for resilience and integration tests.
//!
//! ## Test Philosophy
//!
//! - **No hangs**: Every reader must see end-of-stream once its writers are gone,
//!   including writers that failed or crashed
//! - **Deterministic failures**: All faults are reproducible via FaultPlan
//! - **Isolation**: One pair's failure never leaks into another pair
//! - **Attributable results**: Collection order is the caller's order

use core_types::PairId;
use ipc::WriteEndpoint;
use services_process_manager::{ProcessManager, Termination};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;
use worker_roles::{
    Consumer, FaultPlan, Producer, RoleConfig, RoleError, RoleFactory, RoleKind, RoleSummary,
    SequenceRoles, WorkerContext,
};

/// A coordinator whose producers send `values_per_pair` values without delay
pub fn immediate_manager(values_per_pair: usize) -> ProcessManager {
    ProcessManager::new(SequenceRoles::new(
        RoleConfig::immediate().with_values_per_pair(values_per_pair),
    ))
}

/// A coordinator with no send delay and the given faults
pub fn faulty_manager(values_per_pair: usize, faults: FaultPlan) -> ProcessManager {
    ProcessManager::new(
        SequenceRoles::new(RoleConfig::immediate().with_values_per_pair(values_per_pair))
            .with_fault_plan(faults),
    )
}

/// Sum of `count` consecutive values starting at `start`
pub fn expected_sum(start: i32, count: usize) -> i64 {
    (0..count as i64).map(|i| i64::from(start) + i).sum()
}

/// Finds the collected entry for a pair's worker of the given role
pub fn find(terminations: &[Termination], pair_id: PairId, role: RoleKind) -> &Termination {
    terminations
        .iter()
        .find(|t| t.pair_id == pair_id && t.role == role)
        .unwrap_or_else(|| panic!("no {} termination for {}", role, pair_id))
}

/// Factory that holds back selected producers before they send anything
///
/// Used to force workers to finish in an order different from spawn order.
pub struct StaggeredRoles {
    inner: SequenceRoles,
    delays: HashMap<PairId, Duration>,
}

impl StaggeredRoles {
    pub fn new(values_per_pair: usize) -> Self {
        Self {
            inner: SequenceRoles::new(
                RoleConfig::immediate().with_values_per_pair(values_per_pair),
            ),
            delays: HashMap::new(),
        }
    }

    pub fn with_delay(mut self, pair_id: PairId, delay: Duration) -> Self {
        self.delays.insert(pair_id, delay);
        self
    }
}

impl RoleFactory for StaggeredRoles {
    fn producer(&self, pair_id: PairId, start_value: i32) -> Box<dyn Producer> {
        let inner = self.inner.producer(pair_id, start_value);
        match self.delays.get(&pair_id) {
            Some(delay) => Box::new(DelayedProducer {
                delay: *delay,
                inner,
            }),
            None => inner,
        }
    }

    fn consumer(&self, pair_id: PairId) -> Box<dyn Consumer> {
        self.inner.consumer(pair_id)
    }
}

struct DelayedProducer {
    delay: Duration,
    inner: Box<dyn Producer>,
}

impl Producer for DelayedProducer {
    fn run(
        self: Box<Self>,
        endpoint: WriteEndpoint,
        ctx: &WorkerContext,
    ) -> Result<RoleSummary, RoleError> {
        thread::sleep(self.delay);
        self.inner.run(endpoint, ctx)
    }
}
