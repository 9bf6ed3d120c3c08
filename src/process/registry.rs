/*!
 * Process Registry
 * Tracks the set of running processes by PID
 */

use super::types::{Process, ProcessResult};
use crate::core::errors::ProcessError;
use crate::core::limits::FIRST_PID;
use crate::core::types::Pid;
use ahash::RandomState;
use std::collections::HashMap;
use tracing::debug;

/// Registry of admitted processes.
///
/// Every entry is in the Running state; terminated processes are removed
/// in the same step that terminates them.
#[derive(Debug)]
pub struct ProcessRegistry {
    processes: HashMap<Pid, Process, RandomState>,
    next_pid: Pid,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self {
            processes: HashMap::with_hasher(RandomState::new()),
            next_pid: FIRST_PID,
        }
    }

    /// Insert a running process
    pub fn add(&mut self, process: Process) -> ProcessResult<()> {
        if !process.is_running() {
            return Err(ProcessError::InvalidProcess(format!(
                "PID {} is {}, only running processes can be registered",
                process.pid(),
                process.state()
            )));
        }

        let pid = process.pid();
        if self.processes.contains_key(&pid) {
            return Err(ProcessError::DuplicateProcess(pid));
        }

        debug!(pid, name = process.name(), "Registered process");
        self.processes.insert(pid, process);
        if pid == self.next_pid {
            self.next_pid = pid.wrapping_add(1).max(FIRST_PID);
        }
        Ok(())
    }

    /// Remove and return a process. Status is left untouched.
    pub fn remove(&mut self, pid: Pid) -> ProcessResult<Process> {
        let process = self
            .processes
            .remove(&pid)
            .ok_or(ProcessError::UnknownProcess(pid))?;
        debug!(pid, name = process.name(), "Deregistered process");
        Ok(process)
    }

    /// Snapshot of a registered process
    pub fn lookup(&self, pid: Pid) -> ProcessResult<Process> {
        self.processes
            .get(&pid)
            .cloned()
            .ok_or(ProcessError::UnknownProcess(pid))
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// All registered processes ordered by PID
    pub fn list(&self) -> Vec<Process> {
        let mut processes: Vec<Process> = self.processes.values().cloned().collect();
        processes.sort_by_key(|p| p.pid());
        processes
    }

    /// Next unused PID.
    ///
    /// The counter only moves past a PID once that PID is registered, so a
    /// failed admission does not use one up.
    pub fn next_pid(&mut self) -> Pid {
        while self.processes.contains_key(&self.next_pid) {
            self.next_pid = self.next_pid.wrapping_add(1).max(FIRST_PID);
        }
        self.next_pid
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
