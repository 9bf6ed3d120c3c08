/*!
 * System Limits and Constants
 *
 * Centralized location for the defaults the kernel starts from when no
 * configuration file or environment override is present.
 */

// =============================================================================
// MEMORY LIMITS
// =============================================================================

/// Total simulated memory pool (4KB)
/// Used as default capacity for the memory allocator
pub const DEFAULT_TOTAL_MEMORY: usize = 4096;

/// Memory granted to every admitted process (1KB)
pub const DEFAULT_PROCESS_QUOTA: usize = 1024;

/// Usage ratio at which pressure is reported as MEDIUM
pub const PRESSURE_MEDIUM_THRESHOLD: f64 = 0.60;

/// Usage ratio at which pressure is reported as HIGH
pub const PRESSURE_HIGH_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as CRITICAL
pub const PRESSURE_CRITICAL_THRESHOLD: f64 = 0.95;

// =============================================================================
// PROCESS LIMITS
// =============================================================================

/// First identifier handed out by the registry
pub const FIRST_PID: u32 = 1;

/// Maximum process name length in bytes
pub const MAX_PROCESS_NAME_LEN: usize = 256;

// =============================================================================
// STORAGE
// =============================================================================

/// Default root directory for the local blob store
pub const DEFAULT_STORAGE_ROOT: &str = "/tmp/devos-storage";

// =============================================================================
// MONITORING
// =============================================================================

/// Number of lifecycle events retained by the collector
pub const DEFAULT_EVENT_HISTORY: usize = 256;
