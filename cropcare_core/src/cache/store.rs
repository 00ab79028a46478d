//! The key-value store seam shared by both cache tiers.
//!
//! Each tier reports its own failures through [`StoreError`]. The tiered
//! composition decides what a failure means; no tier error ever leaves the
//! cache module.

use async_trait::async_trait;
use std::time::Duration;

/// Failure of a single tier operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The tier could not be reached at all
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation '{op}' timed out after {after:?}")]
    Timeout { op: &'static str, after: Duration },

    /// The tier answered with an error
    #[error("store command failed: {0}")]
    Command(String),

    /// An in-process lock was poisoned by a panicking holder
    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A byte-oriented key-value store with per-entry TTL.
///
/// Keys passed here are already physical (namespaced) keys. Implementations
/// must be safe for concurrent use from many tasks.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short tier label used in logs and health reports
    fn tier(&self) -> &'static str;

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()>;

    /// Remove `key`. Returns whether anything was removed.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Remove every key starting with `prefix`. Returns the number removed.
    async fn delete_prefix(&self, prefix: &str) -> StoreResult<u64>;

    /// Live round-trip check
    async fn ping(&self) -> StoreResult<()>;

    /// Number of live entries, if the tier can tell cheaply
    async fn len_hint(&self) -> Option<usize> {
        None
    }
}
