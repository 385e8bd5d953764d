//! Deterministic fault injection for testing
//!
//! A [`FaultPlan`] describes which pair should fail and how. The standard
//! role factory turns the plan into a per-worker [`FaultInjector`] that the
//! producer and consumer consult at fixed points in their loops.
//!
//! ## Example
//!
//! ```
//! use core_types::PairId;
//! use worker_roles::{FaultPlan, RoleFault};
//!
//! let plan = FaultPlan::new()
//!     .with_fault(PairId::new(1), RoleFault::ProducerWriteFailure { after: 2 })
//!     .with_fault(PairId::new(2), RoleFault::ProducerCrash { after: 0 });
//! assert_eq!(plan.faults_for(PairId::new(1)).len(), 1);
//! ```

use core_types::PairId;
use ipc::{ChannelEnd, ChannelError};
use std::io;

/// A fault to inject into a role body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFault {
    /// The producer's write of record number `after` fails as if the
    /// reader had gone away
    ProducerWriteFailure { after: usize },

    /// The producer panics once it has sent `after` records
    ProducerCrash { after: usize },

    /// The consumer panics once it has received `after` records
    ConsumerCrash { after: usize },
}

/// A plan describing all faults to inject, keyed by pair
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    faults: Vec<(PairId, RoleFault)>,
}

impl FaultPlan {
    /// Creates a new empty fault plan
    pub fn new() -> Self {
        Self { faults: Vec::new() }
    }

    /// Adds a fault for one pair
    pub fn with_fault(mut self, pair_id: PairId, fault: RoleFault) -> Self {
        self.faults.push((pair_id, fault));
        self
    }

    /// Returns the faults targeted at a pair
    pub fn faults_for(&self, pair_id: PairId) -> Vec<RoleFault> {
        self.faults
            .iter()
            .filter(|(target, _)| *target == pair_id)
            .map(|(_, fault)| *fault)
            .collect()
    }

    /// Builds the injector for one pair's workers
    pub fn injector_for(&self, pair_id: PairId) -> FaultInjector {
        FaultInjector {
            faults: self.faults_for(pair_id),
        }
    }
}

/// Faults a single worker consults while running
#[derive(Debug, Clone, Default)]
pub struct FaultInjector {
    faults: Vec<RoleFault>,
}

impl FaultInjector {
    /// An injector that never fires
    pub fn none() -> Self {
        Self::default()
    }

    /// Called by a producer before writing its next record
    ///
    /// `sent` is the number of records already written.
    pub fn before_send(&self, sent: usize, end: ChannelEnd) -> Result<(), ChannelError> {
        for fault in &self.faults {
            match *fault {
                RoleFault::ProducerCrash { after } if after == sent => {
                    panic!("injected producer crash after {} records", sent);
                }
                RoleFault::ProducerWriteFailure { after } if after == sent => {
                    return Err(ChannelError::Io {
                        end,
                        source: io::Error::new(
                            io::ErrorKind::BrokenPipe,
                            "injected write failure",
                        ),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Called by a consumer before reading its next record
    pub fn before_receive(&self, received: usize) {
        for fault in &self.faults {
            if let RoleFault::ConsumerCrash { after } = *fault {
                if after == received {
                    panic!("injected consumer crash after {} records", received);
                }
            }
        }
    }
}
