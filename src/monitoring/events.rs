/*!
 * Event System
 * Strongly-typed lifecycle events for processes and memory
 */

use crate::core::types::{Pid, Size};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Event severity for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

/// Event category for organization and querying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Process,
    Memory,
}

/// Lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic timestamp (nanoseconds since first event)
    pub timestamp_ns: u64,
    pub severity: Severity,
    pub category: Category,
    /// Process ID if applicable
    pub pid: Option<Pid>,
    pub payload: Payload,
}

/// Event payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    // Process events
    ProcessAdmitted { name: String, quota: Size },
    ProcessRejected { name: String, requested: Size, free: Size },
    ProcessTerminated { name: String },

    // Memory events
    MemoryAllocated { size: Size, free: Size },
    MemoryReleased { size: Size, free: Size },
    MemoryPressure { usage_pct: u8, free: Size },
}

impl Event {
    /// Create a new event with current timestamp
    #[inline]
    pub fn new(severity: Severity, category: Category, payload: Payload) -> Self {
        Self {
            timestamp_ns: Self::now_ns(),
            severity,
            category,
            pid: None,
            payload,
        }
    }

    /// Create event with process context
    #[inline]
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn admitted(pid: Pid, name: &str, quota: Size) -> Self {
        Self::new(
            Severity::Info,
            Category::Process,
            Payload::ProcessAdmitted {
                name: name.to_string(),
                quota,
            },
        )
        .with_pid(pid)
    }

    pub fn rejected(pid: Pid, name: &str, requested: Size, free: Size) -> Self {
        Self::new(
            Severity::Warn,
            Category::Process,
            Payload::ProcessRejected {
                name: name.to_string(),
                requested,
                free,
            },
        )
        .with_pid(pid)
    }

    pub fn terminated(pid: Pid, name: &str) -> Self {
        Self::new(
            Severity::Info,
            Category::Process,
            Payload::ProcessTerminated {
                name: name.to_string(),
            },
        )
        .with_pid(pid)
    }

    /// Human-readable status line for process events
    pub fn status_line(&self) -> Option<String> {
        match &self.payload {
            Payload::ProcessAdmitted { name, .. } => Some(format!("Running process: {}", name)),
            Payload::ProcessRejected { name, .. } => Some(format!(
                "Unable to run process: {} (insufficient memory)",
                name
            )),
            Payload::ProcessTerminated { name } => Some(format!("Terminated process: {}", name)),
            _ => None,
        }
    }

    #[inline]
    fn now_ns() -> u64 {
        static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let start = START.get_or_init(Instant::now);
        start.elapsed().as_nanos() as u64
    }

    /// Get event age
    #[inline]
    pub fn age(&self) -> Duration {
        Duration::from_nanos(Self::now_ns().saturating_sub(self.timestamp_ns))
    }

    /// Check if event matches filter criteria
    #[inline]
    pub fn matches(&self, filter: &EventFilter) -> bool {
        if let Some(min_severity) = filter.min_severity {
            if self.severity < min_severity {
                return false;
            }
        }

        if let Some(category) = filter.category {
            if self.category != category {
                return false;
            }
        }

        if let Some(pid) = filter.pid {
            if self.pid != Some(pid) {
                return false;
            }
        }

        true
    }
}

/// Event filter for queries
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub min_severity: Option<Severity>,
    pub category: Option<Category>,
    pub pid: Option<Pid>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn severity(mut self, min: Severity) -> Self {
        self.min_severity = Some(min);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }
}
