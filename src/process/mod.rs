/*!
 * Process Module
 * Process entities and the registry of running processes
 */

pub mod registry;
pub mod types;
pub(crate) mod validation;

// Re-export for convenience
pub use registry::ProcessRegistry;
pub use types::{Process, ProcessResult, ProcessState};
