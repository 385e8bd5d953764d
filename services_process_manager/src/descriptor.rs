//! Pair descriptors

use core_types::{PairId, WorkerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors laying out pairs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Pair {pair} with {values_per_pair} values per pair runs past i32::MAX")]
    RangeOverflow { pair: usize, values_per_pair: usize },
}

/// What to spawn for one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDescriptor {
    /// Pair identifier, passed to the consumer
    pub pair_id: PairId,
    /// First value the producer sends
    pub start_value: i32,
}

impl PairDescriptor {
    /// Creates a new pair descriptor
    pub fn new(pair_id: PairId, start_value: i32) -> Self {
        Self {
            pair_id,
            start_value,
        }
    }

    /// Descriptors for `count` pairs with adjacent value ranges
    ///
    /// Pair `i` (0-based) is numbered `i + 1` and starts at
    /// `i * values_per_pair + 1`, so no two pairs send the same value. Fails
    /// if any pair's range would not fit in an `i32`.
    pub fn sequence(count: usize, values_per_pair: usize) -> Result<Vec<Self>, DescriptorError> {
        // The last pair has the highest number and values, so it fits iff all do
        if let Some(last) = count.checked_sub(1) {
            if Self::nth(last, values_per_pair).is_none() {
                return Err(DescriptorError::RangeOverflow {
                    pair: count,
                    values_per_pair,
                });
            }
        }
        Ok((0..count)
            .filter_map(|index| Self::nth(index, values_per_pair))
            .collect())
    }

    fn nth(index: usize, values_per_pair: usize) -> Option<Self> {
        let number = index.checked_add(1)?;
        let pair_id = PairId::new(u32::try_from(number).ok()?);
        let last = i32::try_from(number.checked_mul(values_per_pair)?).ok()?;
        let start = last
            .checked_sub(i32::try_from(values_per_pair).ok()?)?
            .checked_add(1)?;
        Some(Self::new(pair_id, start))
    }
}

/// Identities of a freshly spawned pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedPair {
    pub pair_id: PairId,
    pub producer: WorkerId,
    pub consumer: WorkerId,
}

impl SpawnedPair {
    /// Both identities, producer first
    pub fn worker_ids(&self) -> [WorkerId; 2] {
        [self.producer, self.consumer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbering() {
        let pairs = PairDescriptor::sequence(3, 5).unwrap();
        assert_eq!(
            pairs,
            vec![
                PairDescriptor::new(PairId::new(1), 1),
                PairDescriptor::new(PairId::new(2), 6),
                PairDescriptor::new(PairId::new(3), 11),
            ]
        );
    }

    #[test]
    fn test_sequence_empty() {
        assert!(PairDescriptor::sequence(0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_sequence_last_range_ends_at_max() {
        let values_per_pair = (i32::MAX / 2) as usize;
        let pairs = PairDescriptor::sequence(2, values_per_pair).unwrap();
        assert_eq!(pairs[1].start_value, i32::MAX / 2 + 1);
    }

    #[test]
    fn test_sequence_rejects_ranges_past_max() {
        let values_per_pair = (i32::MAX / 2) as usize + 1;
        assert_eq!(
            PairDescriptor::sequence(2, values_per_pair),
            Err(DescriptorError::RangeOverflow {
                pair: 2,
                values_per_pair
            })
        );
        assert!(PairDescriptor::sequence(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_spawned_pair_order() {
        let spawned = SpawnedPair {
            pair_id: PairId::new(1),
            producer: WorkerId::new(),
            consumer: WorkerId::new(),
        };
        assert_eq!(spawned.worker_ids(), [spawned.producer, spawned.consumer]);
    }
}
