//! Worker lifecycle management

use services_logger::LogEntry;
use worker_roles::{RoleError, RoleKind, RoleSummary, WorkerContext};

/// Lifecycle states for a worker
///
/// A worker is `Terminated` only once the collector has reaped it. A worker
/// whose body has returned but has not been collected is still `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Spawned but its body has not started yet
    Spawned,
    /// Body started, not yet reaped
    Running,
    /// Reaped by the collector
    Terminated,
}

/// How a worker body ended when it ended on its own
///
/// This is the thread's return value: the equivalent of calling `exit(code)`
/// at the end of the role. A panic never produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerExit {
    pub code: i32,
    pub summary: Option<RoleSummary>,
}

impl WorkerExit {
    /// Ends the worker with an exit code
    pub fn terminate(code: i32) -> Self {
        Self {
            code,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: RoleSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Maps a role body's result to an exit
    ///
    /// Success exits 0 with the role's summary; any role error is logged and
    /// exits 1.
    pub fn from_role_result(
        role: RoleKind,
        ctx: &WorkerContext,
        result: Result<RoleSummary, RoleError>,
    ) -> Self {
        match result {
            Ok(summary) => Self::terminate(0).with_summary(summary),
            Err(err) => {
                LogEntry::error(format!("{} failed: {}", role, err))
                    .with_source(ctx.worker_id)
                    .with_field("pair", ctx.pair_id.get())
                    .emit();
                Self::terminate(1)
            }
        }
    }
}
