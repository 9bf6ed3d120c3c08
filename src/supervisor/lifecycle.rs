/*!
 * Process Lifecycle
 * Admission and termination under the supervisor lock
 */

use super::{ResourceSupervisor, SupervisorState};
use crate::core::errors::{KernelError, ProcessError};
use crate::core::types::{KernelResult, Pid};
use crate::memory::MemoryPressure;
use crate::monitoring::{Category, Event, OperationSpan, Payload, Severity};
use crate::process::validation::{validate_for_admission, validate_name};
use crate::process::{Process, ProcessState};
use tracing::{error, info, warn};

impl ResourceSupervisor {
    /// Admit a caller-created process.
    ///
    /// Grants the quota, registers the process and marks it Running. If the
    /// quota cannot be granted nothing changes and `InsufficientMemory` is
    /// returned.
    pub fn admit(&self, process: Process) -> KernelResult<Pid> {
        let span = OperationSpan::new("admit", process.pid());
        let _entered = span.enter();

        let result = {
            let mut state = self.state.lock();
            self.admit_locked(&mut state, process)
        };
        record(&span, &result);
        result
    }

    /// Admit a new process with a registry-assigned PID.
    ///
    /// The PID is only taken once the process is registered; a rejected
    /// spawn leaves it for the next caller.
    pub fn spawn(&self, name: impl Into<String>) -> KernelResult<Pid> {
        let name = name.into();
        validate_name(&name)?;

        let mut state = self.state.lock();
        let pid = state.registry.next_pid();

        let span = OperationSpan::new("spawn", pid);
        let _entered = span.enter();

        let result = self.admit_locked(&mut state, Process::new(pid, name));
        record(&span, &result);
        result
    }

    /// Terminate a running process.
    ///
    /// Releases the quota, removes the process from the registry and marks
    /// it Terminated, in that order. The terminated process is handed back
    /// to the caller.
    ///
    /// With a guarded release policy an unregistered PID fails with
    /// `UnknownProcess` before any memory moves. With
    /// [`ReleasePolicy::Permissive`](crate::memory::ReleasePolicy) the quota
    /// is credited first and the registry error follows.
    pub fn terminate(&self, pid: Pid) -> KernelResult<Process> {
        let span = OperationSpan::new("terminate", pid);
        let _entered = span.enter();

        let result = {
            let mut state = self.state.lock();
            self.terminate_locked(&mut state, pid)
        };
        record(&span, &result);
        result
    }

    fn admit_locked(&self, state: &mut SupervisorState, mut process: Process) -> KernelResult<Pid> {
        validate_for_admission(&process)?;

        let pid = process.pid();
        let name = process.name().to_string();

        // Duplicates are refused before memory is touched
        if state.registry.contains(pid) {
            warn!(pid, name = %name, "Process already registered");
            return Err(ProcessError::DuplicateProcess(pid).into());
        }

        if let Err(err) = state.allocator.try_allocate(self.quota) {
            let free = state.allocator.free();
            warn!(pid, free, name = %name, "Process rejected: insufficient memory");
            self.collector
                .emit(Event::rejected(pid, &name, self.quota, free));
            return Err(err.into());
        }

        let registered = process
            .transition_to(ProcessState::Running)
            .and_then(|()| state.registry.add(process));

        if let Err(err) = registered {
            if let Err(release_err) = state.allocator.release(self.quota) {
                error!(pid, error = %release_err, "Failed to roll back quota");
            }
            return Err(err.into());
        }

        let free = state.allocator.free();
        info!(pid, free, name = %name, "Process admitted");

        self.collector.emit(Event::admitted(pid, &name, self.quota));
        self.collector.emit(memory_event(
            pid,
            Payload::MemoryAllocated {
                size: self.quota,
                free,
            },
        ));

        let stats = state.allocator.stats();
        if stats.memory_pressure() >= MemoryPressure::High {
            self.collector.emit(
                Event::new(
                    Severity::Warn,
                    Category::Memory,
                    Payload::MemoryPressure {
                        usage_pct: stats.usage_percentage.min(100.0) as u8,
                        free,
                    },
                )
                .with_pid(pid),
            );
        }

        Ok(pid)
    }

    fn terminate_locked(&self, state: &mut SupervisorState, pid: Pid) -> KernelResult<Process> {
        if state.allocator.policy().is_guarded() && !state.registry.contains(pid) {
            warn!(pid, "Refusing to terminate unregistered process");
            return Err(ProcessError::UnknownProcess(pid).into());
        }

        let credited = state.allocator.release(self.quota)?;
        let free = state.allocator.free();
        self.collector.emit(memory_event(
            pid,
            Payload::MemoryReleased {
                size: credited,
                free,
            },
        ));

        let mut process = match state.registry.remove(pid) {
            Ok(process) => process,
            Err(err) => {
                warn!(
                    pid,
                    credited, free, "Released quota for a process that was never registered"
                );
                return Err(err.into());
            }
        };

        process.transition_to(ProcessState::Terminated)?;

        info!(pid, free, name = process.name(), "Process terminated");
        self.collector.emit(Event::terminated(pid, process.name()));

        Ok(process)
    }
}

fn memory_event(pid: Pid, payload: Payload) -> Event {
    Event::new(Severity::Debug, Category::Memory, payload).with_pid(pid)
}

fn record<T>(span: &OperationSpan, result: &Result<T, KernelError>) {
    match result {
        Ok(_) => span.record_result(true),
        Err(err) => span.record_error(&err.to_string()),
    }
}
