//! Table of spawned workers

use crate::collector::CoordinationError;
use crate::{WorkerExit, WorkerState};
use core_types::{PairId, WorkerId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use worker_roles::RoleKind;

#[derive(Debug)]
struct WorkerEntry {
    pair_id: PairId,
    role: RoleKind,
    started: Arc<AtomicBool>,
    /// `None` once reaped
    handle: Option<JoinHandle<WorkerExit>>,
}

/// A worker taken out of the table by a wait
#[derive(Debug)]
pub(crate) struct ReapedWorker {
    pub pair_id: PairId,
    pub role: RoleKind,
    pub result: thread::Result<WorkerExit>,
}

/// Ordered table of every worker a coordinator has spawned
///
/// Grows without bound; spawn order is kept so a run can be collected
/// deterministically.
#[derive(Debug, Default)]
pub struct WorkerTable {
    entries: HashMap<WorkerId, WorkerEntry>,
    order: Vec<WorkerId>,
}

impl WorkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &mut self,
        worker_id: WorkerId,
        pair_id: PairId,
        role: RoleKind,
        started: Arc<AtomicBool>,
        handle: JoinHandle<WorkerExit>,
    ) {
        self.entries.insert(
            worker_id,
            WorkerEntry {
                pair_id,
                role,
                started,
                handle: Some(handle),
            },
        );
        self.order.push(worker_id);
    }

    /// Worker identities in spawn order
    pub fn spawn_order(&self) -> &[WorkerId] {
        &self.order
    }

    /// Returns the current state of a worker
    pub fn state(&self, worker_id: WorkerId) -> Option<WorkerState> {
        let entry = self.entries.get(&worker_id)?;
        Some(if entry.handle.is_none() {
            WorkerState::Terminated
        } else if entry.started.load(Ordering::Acquire) {
            WorkerState::Running
        } else {
            WorkerState::Spawned
        })
    }

    /// Returns the pair and role a worker was spawned for
    pub fn assignment(&self, worker_id: WorkerId) -> Option<(PairId, RoleKind)> {
        self.entries
            .get(&worker_id)
            .map(|entry| (entry.pair_id, entry.role))
    }

    /// Blocks until a specific worker terminates, then reaps it
    pub(crate) fn reap(&mut self, worker_id: WorkerId) -> Result<ReapedWorker, CoordinationError> {
        let entry = self
            .entries
            .get_mut(&worker_id)
            .ok_or(CoordinationError::UnknownWorker(worker_id))?;
        let handle = entry
            .handle
            .take()
            .ok_or(CoordinationError::AlreadyReaped(worker_id))?;

        Ok(ReapedWorker {
            pair_id: entry.pair_id,
            role: entry.role,
            result: handle.join(),
        })
    }
}
