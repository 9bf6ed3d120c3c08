/*!
 * Process Types
 * Common types for process management
 */

use crate::core::errors::ProcessError;
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Created by the caller, not yet granted memory
    Unadmitted,
    /// Holding a memory quota and registered
    Running,
    /// Quota reclaimed and deregistered
    Terminated,
}

impl ProcessState {
    /// Status only moves one step forward
    pub fn can_transition_to(&self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (ProcessState::Unadmitted, ProcessState::Running)
                | (ProcessState::Running, ProcessState::Terminated)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessState::Unadmitted => write!(f, "unadmitted"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::Terminated => write!(f, "terminated"),
        }
    }
}

/// A unit of work tracked by the kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pid: Pid,
    name: String,
    state: ProcessState,
}

impl Process {
    /// Create an unadmitted process
    pub fn new(pid: Pid, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            state: ProcessState::Unadmitted,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ProcessState::Running
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// Move to `next`, rejecting reverse or skipped transitions
    pub(crate) fn transition_to(&mut self, next: ProcessState) -> ProcessResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(ProcessError::InvalidStateTransition {
                pid: self.pid,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (PID {}, {})", self.name, self.pid, self.state)
    }
}
