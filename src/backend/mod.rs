//! Backend Module
//!
//! Backing key-value engine abstraction. The document store only needs
//! single-key get, set-with-expiry and delete, each atomic per key.

mod entry;
mod memory;
mod redis_backend;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BackendError;

pub use entry::StoredEntry;
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;

/// Key-value engine consumed by the document store.
///
/// Implementations must be shareable across request tasks.
#[async_trait]
pub trait KvBackend: Send + Sync + 'static {
    /// Returns the bytes under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Replaces the value under `key` and resets its expiry to `ttl`.
    ///
    /// Either the whole value and fresh expiry are written, or nothing is.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError>;

    /// Removes `key`. Returns `true` if a live entry was removed.
    async fn delete(&self, key: &str) -> Result<bool, BackendError>;
}
