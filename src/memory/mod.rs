/*!
 * Memory Module
 * Fixed-budget memory accounting
 */

pub mod allocator;
pub mod types;

// Re-export for convenience
pub use allocator::MemoryAllocator;
pub use types::*;
