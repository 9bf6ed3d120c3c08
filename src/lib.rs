/*!
 * DevOS Kernel Library
 * Device-local resource bookkeeping: processes, a fixed memory budget and
 * blob storage
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod supervisor;
pub mod vfs;

// Re-exports
pub use crate::core::{
    ConfigError, KernelConfig, KernelError, KernelResult, Pid, ProcessError, Size,
};
pub use memory::{MemoryAllocator, MemoryError, MemoryPressure, MemoryStats, ReleasePolicy};
pub use monitoring::{init_tracing, Collector, Event, EventFilter, Payload};
pub use process::{Process, ProcessRegistry, ProcessState};
pub use supervisor::{ResourceSupervisor, SupervisorStats};
pub use vfs::{BlobStore, LocalStore, MemStore, VfsError, VfsResult};
