//! Termination outcomes

use core_types::{PairId, WorkerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use worker_roles::{RoleKind, RoleSummary};

/// How a worker ended
///
/// `Normal` covers every exit through the worker's own termination path,
/// including failures reported with a nonzero code. `Abnormal` is reserved
/// for workers that never reached that path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminationOutcome {
    /// Worker called its exit path with `code`
    Normal { code: i32 },
    /// Worker died without exiting (panic)
    Abnormal { reason: String },
}

impl TerminationOutcome {
    /// Checks if the worker exited normally with code 0
    pub fn is_success(&self) -> bool {
        matches!(self, TerminationOutcome::Normal { code: 0 })
    }
}

impl fmt::Display for TerminationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationOutcome::Normal { code } => write!(f, "exited with status {}", code),
            TerminationOutcome::Abnormal { reason } => {
                write!(f, "exited abnormally ({})", reason)
            }
        }
    }
}

/// One collected worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub worker_id: WorkerId,
    pub pair_id: PairId,
    pub role: RoleKind,
    pub outcome: TerminationOutcome,
    /// Present only when the role finished cleanly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<RoleSummary>,
}

impl Termination {
    /// Formats the operator-facing exit line, e.g.
    /// `Producer child (Worker(..)) exited with status 0`
    pub fn summary_line(&self, label: &str) -> String {
        format!("{} ({}) {}", label, self.worker_id, self.outcome)
    }

    /// The consumer's final sum, if this is a consumer that finished cleanly
    pub fn consumed_sum(&self) -> Option<i64> {
        match self.summary {
            Some(RoleSummary::Consumed { sum, .. }) => Some(sum),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn termination(outcome: TerminationOutcome, summary: Option<RoleSummary>) -> Termination {
        Termination {
            worker_id: WorkerId::new(),
            pair_id: PairId::new(1),
            role: RoleKind::Consumer,
            outcome,
            summary,
        }
    }

    #[test]
    fn test_outcome_classification() {
        assert!(TerminationOutcome::Normal { code: 0 }.is_success());
        assert!(!TerminationOutcome::Normal { code: 1 }.is_success());

        let abnormal = TerminationOutcome::Abnormal {
            reason: "boom".to_string(),
        };
        assert!(!abnormal.is_success());
    }

    #[test]
    fn test_summary_line() {
        let t = termination(TerminationOutcome::Normal { code: 0 }, None);
        assert_eq!(
            t.summary_line("Child"),
            format!("Child ({}) exited with status 0", t.worker_id)
        );

        let t = termination(
            TerminationOutcome::Abnormal {
                reason: "boom".to_string(),
            },
            None,
        );
        assert!(t.summary_line("Child").ends_with("exited abnormally (boom)"));
    }

    #[test]
    fn test_consumed_sum() {
        let t = termination(
            TerminationOutcome::Normal { code: 0 },
            Some(RoleSummary::Consumed { count: 5, sum: 40 }),
        );
        assert_eq!(t.consumed_sum(), Some(40));

        let t = termination(
            TerminationOutcome::Normal { code: 0 },
            Some(RoleSummary::Produced { sent: 5 }),
        );
        assert_eq!(t.consumed_sum(), None);
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_string(&TerminationOutcome::Normal { code: 0 }).unwrap();
        assert_eq!(json, r#"{"kind":"normal","code":0}"#);
    }
}
