/*!
 * Memory Allocator
 *
 * Fixed-capacity accounting allocator. It tracks a single free counter
 * against an immutable total; there are no addresses, blocks or
 * fragmentation, only grants and releases of byte counts.
 */

use super::types::{MemoryError, MemoryPressure, MemoryResult, MemoryStats, ReleasePolicy};
use crate::core::types::Size;
use tracing::{debug, info, warn};

/// Fixed-capacity memory allocator
#[derive(Debug, Clone)]
pub struct MemoryAllocator {
    total: Size,
    free: Size,
    policy: ReleasePolicy,
}

impl MemoryAllocator {
    /// Create an allocator with `total` bytes, all free
    pub fn new(total: Size) -> MemoryResult<Self> {
        Self::with_policy(total, ReleasePolicy::default())
    }

    /// Create an allocator with an explicit release policy
    pub fn with_policy(total: Size, policy: ReleasePolicy) -> MemoryResult<Self> {
        if total == 0 {
            return Err(MemoryError::InvalidCapacity(total));
        }
        info!(total, %policy, "Memory allocator initialized");
        Ok(Self {
            total,
            free: total,
            policy,
        })
    }

    /// Grant `amount` bytes if they are free. No partial grants.
    pub fn allocate(&mut self, amount: Size) -> bool {
        self.try_allocate(amount).is_ok()
    }

    /// Grant `amount` bytes, reporting why on failure
    pub fn try_allocate(&mut self, amount: Size) -> MemoryResult<()> {
        if amount > self.free {
            debug!(
                requested = amount,
                free = self.free,
                total = self.total,
                "Allocation refused"
            );
            return Err(MemoryError::InsufficientMemory {
                requested: amount,
                free: self.free,
                total: self.total,
            });
        }

        self.free -= amount;

        let pressure = self.pressure();
        if pressure >= MemoryPressure::High {
            warn!(
                amount,
                free = self.free,
                total = self.total,
                %pressure,
                "Memory pressure after allocation"
            );
        } else {
            debug!(amount, free = self.free, total = self.total, "Allocated");
        }
        Ok(())
    }

    /// Return `amount` bytes to the pool.
    ///
    /// Accounting only: the allocator cannot tell whether `amount` was ever
    /// granted. Releases that would overflow the total are handled by the
    /// configured [`ReleasePolicy`]. Returns the number of bytes credited.
    pub fn release(&mut self, amount: Size) -> MemoryResult<Size> {
        let headroom = self.total.saturating_sub(self.free);

        if amount <= headroom {
            self.free += amount;
            debug!(amount, free = self.free, total = self.total, "Released");
            return Ok(amount);
        }

        match self.policy {
            ReleasePolicy::Strict => {
                warn!(
                    amount,
                    free = self.free,
                    total = self.total,
                    "Rejected release beyond capacity"
                );
                Err(MemoryError::OverRelease {
                    amount,
                    free: self.free,
                    total: self.total,
                })
            }
            ReleasePolicy::Clamp => {
                self.free = self.total;
                warn!(
                    amount,
                    credited = headroom,
                    dropped = amount - headroom,
                    "Release clamped to capacity"
                );
                Ok(headroom)
            }
            ReleasePolicy::Permissive => {
                self.free = self.free.saturating_add(amount);
                warn!(
                    amount,
                    free = self.free,
                    total = self.total,
                    "Free memory now exceeds total capacity"
                );
                Ok(amount)
            }
        }
    }

    pub fn total(&self) -> Size {
        self.total
    }

    pub fn free(&self) -> Size {
        self.free
    }

    /// Bytes currently granted (zero if permissive releases overflowed)
    pub fn used(&self) -> Size {
        self.total.saturating_sub(self.free)
    }

    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    pub fn can_allocate(&self, amount: Size) -> bool {
        amount <= self.free
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats::new(self.total, self.free)
    }

    pub fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
