//! Unique identifiers for workers and pairs

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a worker
///
/// Workers are individual units of execution running one role. Unlike an OS
/// process id, a worker id is never recycled, so a stale id can always be
/// told apart from a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(Uuid);

impl WorkerId {
    /// Creates a new random worker ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker({})", self.0)
    }
}

/// Identifier for a producer/consumer pair
///
/// Pair ids are small and operator-facing. The basic demo runs pair 0 and
/// multi-pair runs number their pairs from 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PairId(u32);

impl PairId {
    /// Creates a pair ID from its number
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the pair number
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for PairId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_id_creation() {
        let id1 = WorkerId::new();
        let id2 = WorkerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_worker_id_display() {
        let id = WorkerId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("Worker("));
    }

    #[test]
    fn test_pair_id_ordering() {
        assert!(PairId::new(1) < PairId::new(2));
        assert_eq!(PairId::from(3).get(), 3);
    }

    #[test]
    fn test_pair_id_display() {
        assert_eq!(format!("{}", PairId::new(7)), "Pair(7)");
    }

    #[test]
    fn test_pair_id_serializes_as_number() {
        let json = serde_json::to_string(&PairId::new(4)).unwrap();
        assert_eq!(json, "4");
    }
}
