/*!
 * Memory Module
 * Contiguous memory allocation with fit policies and coalescing
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::{coalesce_free_blocks, verify_partition, MemoryManager, DEFAULT_CAPACITY};
pub use traits::*;
pub use types::*;
