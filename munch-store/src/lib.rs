//! Bounded recency storage for the munch client
//!
//! Remembers the last N distinct records the user interacted with, per
//! logical category (recent searches, recent places), most-recent-first,
//! durably across restarts.

pub mod recent;

// Re-exports
pub use recent::{RecentNamespace, RecentStore, StorageError, StorageResult};
