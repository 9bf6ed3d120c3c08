/*!
 * Virtual File System Module
 * Blob storage used by callers outside the resource-accounting core
 */

pub mod local;
pub mod memory;
pub mod traits;
pub mod types;

// Re-exports
pub use local::LocalStore;
pub use memory::MemStore;
pub use traits::BlobStore;
pub use types::{VfsError, VfsResult};
