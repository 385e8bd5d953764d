//! # Process Manager Service
//!
//! This crate spawns producer/consumer pairs and collects their exits.
//!
//! ## Philosophy
//!
//! Workers are managed explicitly with clear lifecycle states. Compared to
//! a fork/wait loop over a fixed pid array, we focus on:
//! - Explicit endpoint ownership (the coordinator closes its copies, each
//!   worker closes the side it does not use)
//! - Targeted waits in a caller-chosen order (never "any child")
//! - Typed termination outcomes instead of raw status words
//!
//! ## Components
//!
//! - [`ProcessManager`]: the pair coordinator
//! - [`collector::collect`]: the completion collector
//! - [`TerminationReport`]: operator-facing summary of a run

pub mod collector;
pub mod descriptor;
pub mod lifecycle;
pub mod manager;
pub mod outcome;
pub mod process_info;
pub mod table;

pub use collector::{collect, CoordinationError};
pub use descriptor::{DescriptorError, PairDescriptor, SpawnedPair};
pub use lifecycle::{WorkerExit, WorkerState};
pub use manager::{ProcessManager, ProcessManagerError};
pub use outcome::{Termination, TerminationOutcome};
pub use process_info::TerminationReport;
pub use table::WorkerTable;
