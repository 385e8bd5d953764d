//! # Termination Reports
//!
//! This module turns collected terminations into operator-facing output.

use crate::Termination;
use core_types::PairId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use worker_roles::RoleKind;

/// Collected terminations of a run, in collection order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationReport {
    terminations: Vec<Termination>,
}

impl TerminationReport {
    /// Creates a report from collected terminations
    pub fn new(terminations: Vec<Termination>) -> Self {
        Self { terminations }
    }

    pub fn terminations(&self) -> &[Termination] {
        &self.terminations
    }

    pub fn len(&self) -> usize {
        self.terminations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminations.is_empty()
    }

    /// Checks if every worker exited normally with code 0
    pub fn all_normal(&self) -> bool {
        self.terminations.iter().all(|t| t.outcome.is_success())
    }

    /// Final sums of consumers that finished cleanly, by pair
    pub fn pair_sums(&self) -> BTreeMap<PairId, i64> {
        self.terminations
            .iter()
            .filter_map(|t| t.consumed_sum().map(|sum| (t.pair_id, sum)))
            .collect()
    }

    /// Per-worker exit lines labelled by role, e.g. `Producer child (..)`
    pub fn role_lines(&self) -> Vec<String> {
        self.terminations
            .iter()
            .map(|t| {
                let label = match t.role {
                    RoleKind::Producer => "Producer child",
                    RoleKind::Consumer => "Consumer child",
                };
                t.summary_line(label)
            })
            .collect()
    }

    /// Per-worker exit lines with a generic `Child` label
    pub fn child_lines(&self) -> Vec<String> {
        self.terminations
            .iter()
            .map(|t| t.summary_line("Child"))
            .collect()
    }

    /// Formats the report as a table
    pub fn format_table(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<44} {:<6} {:<10} {}\n",
            "WORKER ID", "PAIR", "ROLE", "OUTCOME"
        ));
        output.push_str("-".repeat(90).as_str());
        output.push('\n');

        for t in &self.terminations {
            output.push_str(&format!(
                "{:<44} {:<6} {:<10} {}\n",
                t.worker_id.to_string(),
                t.pair_id.get(),
                t.role.as_str(),
                t.outcome
            ));
        }

        output
    }
}

impl fmt::Display for TerminationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_table())
    }
}
