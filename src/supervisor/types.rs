/*!
 * Supervisor Types
 */

use crate::core::types::Size;
use crate::memory::{MemoryStats, ReleasePolicy};
use crate::monitoring::EventCounts;
use serde::{Deserialize, Serialize};

/// Snapshot of supervisor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SupervisorStats {
    pub running_processes: usize,
    pub quota_per_process: Size,
    pub release_policy: ReleasePolicy,
    pub memory: MemoryStats,
    pub events: EventCounts,
}

impl SupervisorStats {
    /// How many more processes fit in the remaining memory
    pub fn admission_headroom(&self) -> usize {
        self.memory
            .free_memory
            .checked_div(self.quota_per_process)
            .unwrap_or(0)
    }
}
