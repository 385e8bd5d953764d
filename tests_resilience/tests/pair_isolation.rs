//! Pair Isolation Tests
//!
//! Validates that concurrently running pairs never see each other's values.

use core_types::PairId;
use services_process_manager::{PairDescriptor, ProcessManager};
use std::time::Duration;
use tests_resilience::{expected_sum, find, StaggeredRoles};
use worker_roles::{RoleKind, RoleSummary};

/// Test: value ranges of a pair sequence are pairwise disjoint
#[test]
fn test_sequence_ranges_disjoint() {
    let pairs = PairDescriptor::sequence(10, 5).expect("Invalid pair layout");
    for (i, a) in pairs.iter().enumerate() {
        for b in &pairs[i + 1..] {
            let a_range = a.start_value..a.start_value + 5;
            let b_range = b.start_value..b.start_value + 5;
            assert!(a_range.end <= b_range.start || b_range.end <= a_range.start);
        }
    }
}

/// Test: interleaved pairs each sum exactly their own range
#[test]
fn test_concurrent_pairs_do_not_cross_talk() {
    let mut roles = StaggeredRoles::new(5);
    for pair in 1..=8u32 {
        roles = roles.with_delay(PairId::new(pair), Duration::from_millis(u64::from(pair % 3) * 20));
    }
    let mut manager = ProcessManager::new(roles);
    let pairs = PairDescriptor::sequence(8, 5).expect("Invalid pair layout");
    manager.spawn_pairs(&pairs).expect("Failed to spawn pairs");

    let terminations = manager.collect_all().expect("Collection failed");
    assert_eq!(terminations.len(), 16);
    for pair in &pairs {
        let consumer = find(&terminations, pair.pair_id, RoleKind::Consumer);
        assert_eq!(
            consumer.summary,
            Some(RoleSummary::Consumed {
                count: 5,
                sum: expected_sum(pair.start_value, 5)
            })
        );
        assert!(consumer.outcome.is_success());
    }
}
