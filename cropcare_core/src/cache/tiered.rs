//! Two-tier cache composition.
//!
//! The external tier is consulted first, the in-process tier second. Tier
//! failures are counted and logged here and never reach callers: every
//! operation degrades to a miss or a partial write instead.
//!
//! A value found only in the in-process tier is returned as-is and is NOT
//! copied back to the external tier.

use super::key::KeySpace;
use super::memory::{MemoryStore, TtlPolicy};
use super::redis::RedisStore;
use super::store::{KeyValueStore, StoreError, StoreResult};
use crate::config::CacheConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cumulative cache counters since process start
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub external_hits: u64,
    pub memory_hits: u64,
    pub errors: u64,
    pub hit_rate_percent: f64,
    pub external_enabled: bool,
    pub memory_entries: Option<usize>,
    pub memory_capacity: usize,
}

impl CacheStats {
    /// `hits / (hits + misses) * 100`, zero before any request
    pub fn hit_rate(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64 * 100.0
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum TierStatus {
    Healthy,
    Unhealthy(String),
    Disabled,
}

impl TierStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, TierStatus::Healthy)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheHealth {
    pub memory: TierStatus,
    pub external: TierStatus,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    external_hits: AtomicU64,
    memory_hits: AtomicU64,
    errors: AtomicU64,
}

/// Memoizing cache with an optional external tier and an in-process fallback
pub struct TieredCache {
    keys: KeySpace,
    external: Option<Arc<dyn KeyValueStore>>,
    local: Arc<dyn KeyValueStore>,
    default_ttl: Duration,
    op_timeout: Duration,
    memory_capacity: usize,
    counters: Counters,
}

impl TieredCache {
    /// Compose explicit tiers.
    pub fn new(
        keys: KeySpace,
        external: Option<Arc<dyn KeyValueStore>>,
        local: Arc<dyn KeyValueStore>,
        default_ttl: Duration,
        op_timeout: Duration,
        memory_capacity: usize,
    ) -> Self {
        Self {
            keys,
            external,
            local,
            default_ttl,
            op_timeout,
            memory_capacity,
            counters: Counters::default(),
        }
    }

    /// Build both tiers from configuration.
    ///
    /// A Redis connection failure is logged and leaves the external tier
    /// disabled; it never fails construction.
    pub async fn from_config(config: &CacheConfig) -> Self {
        let external: Option<Arc<dyn KeyValueStore>> = if config.redis_enabled {
            match RedisStore::connect(
                &config.redis_url,
                config.connect_timeout(),
                config.operation_timeout(),
            )
            .await
            {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    tracing::error!(
                        "Redis connection failed: {}. Falling back to memory cache.",
                        e
                    );
                    None
                }
            }
        } else {
            tracing::info!("Redis disabled, using memory cache only");
            None
        };

        Self::with_local_tier(config, external)
    }

    /// In-process tier only
    pub fn memory_only(config: &CacheConfig) -> Self {
        Self::with_local_tier(config, None)
    }

    /// The in-process tier keeps every entry for `ttl_default_secs`,
    /// whatever TTL the writer asked for.
    fn with_local_tier(config: &CacheConfig, external: Option<Arc<dyn KeyValueStore>>) -> Self {
        let local = MemoryStore::new(config.memory_capacity, TtlPolicy::Fixed(config.default_ttl()));
        let capacity = local.capacity();
        Self::new(
            KeySpace::new(config.namespace.clone(), config.long_key_threshold),
            external,
            Arc::new(local),
            config.default_ttl(),
            config.operation_timeout(),
            capacity,
        )
    }

    pub fn in_memory() -> Self {
        Self::memory_only(&CacheConfig::default())
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // ========================================================================
    // Tier plumbing
    // ========================================================================

    async fn call<T, F>(&self, tier: &'static str, op: &'static str, fut: F) -> Option<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let outcome = match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                op,
                after: self.op_timeout,
            }),
        };
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                tracing::error!(tier, op, "cache tier error: {}", e);
                None
            }
        }
    }

    fn decode<T: DeserializeOwned>(&self, tier: &'static str, key: &str, bytes: &[u8]) -> Option<T> {
        match serde_json::from_slice(bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                tracing::error!(tier, key, "cached value failed to decode: {}", e);
                None
            }
        }
    }

    // ========================================================================
    // Public operations
    // ========================================================================

    /// Look up a logical key, external tier first.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let physical = self.keys.physical(key);

        if let Some(external) = &self.external {
            if let Some(Some(bytes)) = self.call(external.tier(), "get", external.get(&physical)).await {
                if let Some(value) = self.decode(external.tier(), key, &bytes) {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    self.counters.external_hits.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key, tier = external.tier(), "cache hit");
                    return Some(value);
                }
            }
        }

        if let Some(Some(bytes)) = self.call(self.local.tier(), "get", self.local.get(&physical)).await {
            if let Some(value) = self.decode(self.local.tier(), key, &bytes) {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                self.counters.memory_hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key, tier = self.local.tier(), "cache hit");
                return Some(value);
            }
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key, "cache miss");
        None
    }

    /// Store a value in every tier independently.
    ///
    /// Returns true if at least one tier accepted the write. The in-process
    /// tier applies its own fixed lifetime.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Option<Duration>) -> bool {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                tracing::error!(key, "value failed to serialize for cache: {}", e);
                return false;
            }
        };
        let physical = self.keys.physical(key);
        let ttl = ttl.unwrap_or(self.default_ttl);

        let mut stored = false;
        if let Some(external) = &self.external {
            stored |= self
                .call(external.tier(), "set", external.set(&physical, &bytes, ttl))
                .await
                .is_some();
        }
        stored |= self
            .call(self.local.tier(), "set", self.local.set(&physical, &bytes, ttl))
            .await
            .is_some();

        tracing::debug!(key, ttl_secs = ttl.as_secs(), stored, "cache set");
        stored
    }

    /// Best-effort removal from both tiers. Returns whether any tier held the key.
    pub async fn delete(&self, key: &str) -> bool {
        let physical = self.keys.physical(key);
        let mut removed = false;
        if let Some(external) = &self.external {
            removed |= self
                .call(external.tier(), "delete", external.delete(&physical))
                .await
                .unwrap_or(false);
        }
        removed |= self
            .call(self.local.tier(), "delete", self.local.delete(&physical))
            .await
            .unwrap_or(false);
        removed
    }

    /// Remove every key under a logical prefix from both tiers.
    ///
    /// Returns the number of physical entries removed, summed across tiers.
    pub async fn clear_pattern(&self, logical_prefix: &str) -> u64 {
        let prefix = self.keys.prefix(logical_prefix);
        let mut removed = 0;
        if let Some(external) = &self.external {
            removed += self
                .call(external.tier(), "delete_prefix", external.delete_prefix(&prefix))
                .await
                .unwrap_or(0);
        }
        removed += self
            .call(self.local.tier(), "delete_prefix", self.local.delete_prefix(&prefix))
            .await
            .unwrap_or(0);
        tracing::info!(prefix = %prefix, removed, "cleared cache entries");
        removed
    }

    /// Return the cached value or compute, cache and return it.
    ///
    /// Only successful computations are cached.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key).await {
            return Ok(hit);
        }
        let value = compute().await?;
        self.set(key, &value, ttl).await;
        Ok(value)
    }

    pub async fn stats(&self) -> CacheStats {
        let hits = self.counters.hits.load(Ordering::Relaxed);
        let misses = self.counters.misses.load(Ordering::Relaxed);
        CacheStats {
            hits,
            misses,
            external_hits: self.counters.external_hits.load(Ordering::Relaxed),
            memory_hits: self.counters.memory_hits.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
            hit_rate_percent: CacheStats::hit_rate(hits, misses),
            external_enabled: self.external.is_some(),
            memory_entries: self.local.len_hint().await,
            memory_capacity: self.memory_capacity,
        }
    }

    /// Probe each tier with a bounded round trip.
    pub async fn health_check(&self) -> CacheHealth {
        let memory = ping_tier(self.local.as_ref(), self.op_timeout).await;
        let external = match &self.external {
            Some(external) => ping_tier(external.as_ref(), self.op_timeout).await,
            None => TierStatus::Disabled,
        };
        CacheHealth { memory, external }
    }
}

async fn ping_tier(store: &dyn KeyValueStore, limit: Duration) -> TierStatus {
    match tokio::time::timeout(limit, store.ping()).await {
        Ok(Ok(())) => TierStatus::Healthy,
        Ok(Err(e)) => TierStatus::Unhealthy(e.to_string()),
        Err(_) => TierStatus::Unhealthy(format!("ping timed out after {:?}", limit)),
    }
}
