/*!
 * Resource Supervisor
 *
 * Composes the memory allocator and the process registry. A process is
 * admitted only if its quota can be granted, and torn down by reclaiming
 * the quota, deregistering it and marking it terminated, in that order.
 *
 * Allocator and registry share one lock so every admit/terminate is a
 * single critical section.
 */

mod lifecycle;
pub mod types;

pub use types::SupervisorStats;

use crate::core::config::KernelConfig;
use crate::core::errors::KernelError;
use crate::core::types::{KernelResult, Pid, Size};
use crate::memory::{MemoryAllocator, MemoryStats, ReleasePolicy};
use crate::monitoring::Collector;
use crate::process::{Process, ProcessRegistry};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// State guarded by the supervisor lock
#[derive(Debug)]
pub(super) struct SupervisorState {
    pub(super) allocator: MemoryAllocator,
    pub(super) registry: ProcessRegistry,
}

/// Resource supervisor
///
/// Cloning yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct ResourceSupervisor {
    state: Arc<Mutex<SupervisorState>>,
    quota: Size,
    collector: Collector,
}

impl ResourceSupervisor {
    /// Build a supervisor from validated configuration
    pub fn new(config: &KernelConfig) -> KernelResult<Self> {
        config.validate()?;

        let allocator = MemoryAllocator::with_policy(config.total_memory, config.release_policy)?;

        info!(
            total_memory = config.total_memory,
            quota = config.quota_per_process,
            release_policy = %config.release_policy,
            "Resource supervisor initialized"
        );

        Ok(Self {
            state: Arc::new(Mutex::new(SupervisorState {
                allocator,
                registry: ProcessRegistry::new(),
            })),
            quota: config.quota_per_process,
            collector: Collector::with_capacity(config.event_history),
        })
    }

    /// Supervisor with the given pool and quota, defaults elsewhere
    pub fn with_capacity(total_memory: Size, quota: Size) -> KernelResult<Self> {
        Self::new(
            &KernelConfig::default()
                .with_total_memory(total_memory)
                .with_quota(quota),
        )
    }

    /// Memory granted to each admitted process
    pub fn quota(&self) -> Size {
        self.quota
    }

    pub fn total_memory(&self) -> Size {
        self.state.lock().allocator.total()
    }

    pub fn free_memory(&self) -> Size {
        self.state.lock().allocator.free()
    }

    pub fn release_policy(&self) -> ReleasePolicy {
        self.state.lock().allocator.policy()
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.state.lock().allocator.stats()
    }

    /// Snapshot of a running process
    pub fn lookup(&self, pid: Pid) -> KernelResult<Process> {
        self.state
            .lock()
            .registry
            .lookup(pid)
            .map_err(KernelError::from)
    }

    pub fn is_running(&self, pid: Pid) -> bool {
        self.state.lock().registry.contains(pid)
    }

    /// Running processes ordered by PID
    pub fn list_processes(&self) -> Vec<Process> {
        self.state.lock().registry.list()
    }

    pub fn running_count(&self) -> usize {
        self.state.lock().registry.len()
    }

    /// Lifecycle event collector
    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn stats(&self) -> SupervisorStats {
        let state = self.state.lock();
        SupervisorStats {
            running_processes: state.registry.len(),
            quota_per_process: self.quota,
            release_policy: state.allocator.policy(),
            memory: state.allocator.stats(),
            events: self.collector.counts(),
        }
    }
}

impl TryFrom<KernelConfig> for ResourceSupervisor {
    type Error = KernelError;

    fn try_from(config: KernelConfig) -> Result<Self, Self::Error> {
        Self::new(&config)
    }
}

