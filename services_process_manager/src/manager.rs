//! Pair coordinator.

use crate::{
    collect, CoordinationError, PairDescriptor, SpawnedPair, Termination, WorkerExit,
    WorkerState, WorkerTable,
};
use core_types::{PairId, WorkerId};
use ipc::{create_channel, ChannelError};
use services_logger::LogEntry;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use worker_roles::{RoleError, RoleFactory, RoleKind, RoleSummary, WorkerContext};

#[derive(Debug, Error)]
pub enum ProcessManagerError {
    #[error("Resource exhausted: {what}")]
    ResourceExhausted {
        what: String,
        #[source]
        source: io::Error,
    },

    #[error("Channel error: {0}")]
    Channel(ChannelError),

    #[error("Coordination error: {0}")]
    Coordination(#[from] CoordinationError),
}

impl From<ChannelError> for ProcessManagerError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::ResourceExhausted(source) => ProcessManagerError::ResourceExhausted {
                what: "channel endpoints".to_string(),
                source,
            },
            other => ProcessManagerError::Channel(other),
        }
    }
}

/// Spawns producer/consumer pairs and tracks their workers.
///
/// Every pair gets its own channel. No channel, endpoint or worker is ever
/// shared between pairs.
pub struct ProcessManager {
    roles: Box<dyn RoleFactory>,
    table: WorkerTable,
}

impl ProcessManager {
    pub fn new(roles: impl RoleFactory + 'static) -> Self {
        Self {
            roles: Box::new(roles),
            table: WorkerTable::new(),
        }
    }

    /// Spawns one pair wired through a fresh channel.
    ///
    /// Both workers inherit both endpoints and close the one they do not
    /// use before their role runs. The coordinator's own copies are closed
    /// once both workers exist. Spawn failures are returned at once; any
    /// endpoint copies still held here are closed on the way out.
    pub fn spawn_pair(
        &mut self,
        pair: &PairDescriptor,
    ) -> Result<SpawnedPair, ProcessManagerError> {
        let mut channel = create_channel()?;

        let producer_side = channel.inherit()?;
        let producer = self.roles.producer(pair.pair_id, pair.start_value);
        let producer_id = self.spawn_worker(pair.pair_id, RoleKind::Producer, move |ctx| {
            producer.run(producer_side.into_write(), ctx)
        })?;
        LogEntry::info(format!("Created producer child ({})", producer_id))
            .with_field("pair", pair.pair_id.get())
            .emit();

        let consumer_side = channel.inherit()?;
        let consumer = self.roles.consumer(pair.pair_id);
        let consumer_id = self.spawn_worker(pair.pair_id, RoleKind::Consumer, move |ctx| {
            consumer.run(consumer_side.into_read(), ctx)
        })?;
        LogEntry::info(format!("Created consumer child ({})", consumer_id))
            .with_field("pair", pair.pair_id.get())
            .emit();

        channel.close();

        Ok(SpawnedPair {
            pair_id: pair.pair_id,
            producer: producer_id,
            consumer: consumer_id,
        })
    }

    /// Spawns every pair in order, stopping at the first failure.
    pub fn spawn_pairs(
        &mut self,
        pairs: &[PairDescriptor],
    ) -> Result<Vec<SpawnedPair>, ProcessManagerError> {
        pairs.iter().map(|pair| self.spawn_pair(pair)).collect()
    }

    /// Worker identities in spawn order.
    pub fn worker_ids(&self) -> Vec<WorkerId> {
        self.table.spawn_order().to_vec()
    }

    /// Returns the state of a worker.
    pub fn state(&self, worker_id: WorkerId) -> Option<WorkerState> {
        self.table.state(worker_id)
    }

    /// Returns the pair and role a worker was spawned for.
    pub fn assignment(&self, worker_id: WorkerId) -> Option<(PairId, RoleKind)> {
        self.table.assignment(worker_id)
    }

    /// Waits for the given workers, in the given order.
    pub fn collect(
        &mut self,
        worker_ids: &[WorkerId],
    ) -> Result<Vec<Termination>, ProcessManagerError> {
        Ok(collect(&mut self.table, worker_ids)?)
    }

    /// Waits for every spawned worker, in spawn order.
    pub fn collect_all(&mut self) -> Result<Vec<Termination>, ProcessManagerError> {
        let worker_ids = self.worker_ids();
        self.collect(&worker_ids)
    }

    fn spawn_worker<F>(
        &mut self,
        pair_id: PairId,
        role: RoleKind,
        body: F,
    ) -> Result<WorkerId, ProcessManagerError>
    where
        F: FnOnce(&WorkerContext) -> Result<RoleSummary, RoleError> + Send + 'static,
    {
        let worker_id = WorkerId::new();
        let ctx = WorkerContext::new(worker_id, pair_id);
        let started = Arc::new(AtomicBool::new(false));
        let started_flag = Arc::clone(&started);

        let handle = thread::Builder::new()
            .name(format!("{}-{}", role.as_str().to_lowercase(), pair_id.get()))
            .spawn(move || {
                started_flag.store(true, Ordering::Release);
                WorkerExit::from_role_result(role, &ctx, body(&ctx))
            })
            .map_err(|source| ProcessManagerError::ResourceExhausted {
                what: format!("{} worker for {}", role, pair_id),
                source,
            })?;

        self.table
            .insert(worker_id, pair_id, role, started, handle);
        Ok(worker_id)
    }
}
