//! Completion collector

use crate::{Termination, TerminationOutcome, WorkerTable};
use core_types::WorkerId;
use std::any::Any;
use thiserror::Error;

/// Errors that indicate a coordination bug, not a worker fault
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinationError {
    #[error("Unknown worker: {0}")]
    UnknownWorker(WorkerId),

    #[error("Worker already reaped: {0}")]
    AlreadyReaped(WorkerId),
}

/// Waits for each worker in `worker_ids`, in that order
///
/// Each wait targets one specific worker, so the result has exactly one
/// entry per id in the order given, however the workers actually finished.
/// The first coordination error aborts the collection.
pub fn collect(
    table: &mut WorkerTable,
    worker_ids: &[WorkerId],
) -> Result<Vec<Termination>, CoordinationError> {
    let mut terminations = Vec::with_capacity(worker_ids.len());
    for &worker_id in worker_ids {
        let reaped = table.reap(worker_id)?;
        let (outcome, summary) = match reaped.result {
            Ok(exit) => (TerminationOutcome::Normal { code: exit.code }, exit.summary),
            Err(payload) => (
                TerminationOutcome::Abnormal {
                    reason: panic_reason(payload.as_ref()),
                },
                None,
            ),
        };
        terminations.push(Termination {
            worker_id,
            pair_id: reaped.pair_id,
            role: reaped.role,
            outcome,
            summary,
        });
    }
    Ok(terminations)
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
