//! Role configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of values each producer sends by default
pub const DEFAULT_VALUES_PER_PAIR: usize = 5;

/// Pause between producer sends by default
pub const DEFAULT_SEND_DELAY_MS: u64 = 100;

/// Parameters shared by every producer and consumer in a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Records each producer sends
    pub values_per_pair: usize,
    /// Pause after each send, in milliseconds. Cosmetic only.
    pub send_delay_ms: u64,
}

impl RoleConfig {
    /// Configuration with no send delay, for tests and batch runs
    pub fn immediate() -> Self {
        Self {
            send_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn with_values_per_pair(mut self, values_per_pair: usize) -> Self {
        self.values_per_pair = values_per_pair;
        self
    }

    pub fn with_send_delay_ms(mut self, send_delay_ms: u64) -> Self {
        self.send_delay_ms = send_delay_ms;
        self
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            values_per_pair: DEFAULT_VALUES_PER_PAIR,
            send_delay_ms: DEFAULT_SEND_DELAY_MS,
        }
    }
}
