//! Two-tier memoization cache.
//!
//! - [`store`]: the `KeyValueStore` seam and its tier-local error type
//! - [`memory`]: bounded in-process tier
//! - [`redis`]: external Redis tier
//! - [`tiered`]: composition with statistics and health checks

pub mod key;
pub mod memory;
pub mod redis;
pub mod store;
pub mod tiered;

pub use self::key::{fingerprint, KeySpace};
pub use self::memory::{MemoryStore, TtlPolicy};
pub use self::redis::RedisStore;
pub use self::store::{KeyValueStore, StoreError, StoreResult};
pub use self::tiered::{CacheHealth, CacheStats, TierStatus, TieredCache};
