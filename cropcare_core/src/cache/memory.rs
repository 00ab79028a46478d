//! Bounded in-process cache tier.
//!
//! Entries expire lazily on read. When the store is full, expired entries are
//! purged first and then the oldest insertion is evicted. Expiry uses
//! `tokio::time::Instant`, so paused-clock tests can advance time.

use super::store::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// How the in-process tier assigns TTLs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtlPolicy {
    /// Honor the TTL each writer requests
    PerEntry,
    /// Ignore the requested TTL and apply one fixed lifetime
    Fixed(Duration),
}

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
    seq: u64,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

/// Thread-safe TTL map with a capacity bound
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    capacity: usize,
    policy: TtlPolicy,
}

impl MemoryStore {
    pub fn new(capacity: usize, policy: TtlPolicy) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            policy,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    fn ttl_for(&self, requested: Duration) -> Duration {
        match self.policy {
            TtlPolicy::PerEntry => requested,
            TtlPolicy::Fixed(ttl) => ttl,
        }
    }
}

impl Inner {
    fn make_room(&mut self, capacity: usize, now: Instant) {
        if self.entries.len() < capacity {
            return;
        }
        self.entries.retain(|_, entry| entry.is_live(now));
        while self.entries.len() >= capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                    tracing::debug!(key = %key, "evicted from memory tier");
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn tier(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let now = Instant::now();
        let mut inner = self.lock()?;
        match inner.entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                inner.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()> {
        let now = Instant::now();
        let expires_at = now + self.ttl_for(ttl);
        let mut inner = self.lock()?;

        if !inner.entries.contains_key(key) {
            inner.make_room(self.capacity, now);
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                expires_at,
                seq,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.lock()?.entries.remove(key).is_some())
    }

    async fn delete_prefix(&self, prefix: &str) -> StoreResult<u64> {
        let mut inner = self.lock()?;
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - inner.entries.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    async fn len_hint(&self) -> Option<usize> {
        let now = Instant::now();
        self.lock()
            .ok()
            .map(|inner| inner.entries.values().filter(|e| e.is_live(now)).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const MINUTE: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new(10, TtlPolicy::PerEntry);
        store.set("k", b"value", MINUTE).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let store = MemoryStore::new(10, TtlPolicy::PerEntry);
        store.set("k", b"v", Duration::from_secs(5)).await.unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("k").await.unwrap().is_none());
        assert_eq!(store.len_hint().await, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_policy_ignores_requested_ttl() {
        let store = MemoryStore::new(10, TtlPolicy::Fixed(Duration::from_secs(10)));
        store.set("k", b"v", Duration::from_secs(3600)).await.unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = MemoryStore::new(2, TtlPolicy::PerEntry);
        store.set("a", b"1", MINUTE).await.unwrap();
        store.set("b", b"2", MINUTE).await.unwrap();
        store.set("c", b"3", MINUTE).await.unwrap();

        assert!(store.get("a").await.unwrap().is_none());
        assert!(store.get("b").await.unwrap().is_some());
        assert!(store.get("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_overwrite_does_not_evict() {
        let store = MemoryStore::new(2, TtlPolicy::PerEntry);
        store.set("a", b"1", MINUTE).await.unwrap();
        store.set("b", b"2", MINUTE).await.unwrap();
        store.set("a", b"3", MINUTE).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(b"3".to_vec()));
        assert!(store.get("b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_prefix_counts_removed() {
        let store = MemoryStore::new(10, TtlPolicy::PerEntry);
        store.set("ns:disease_info:a", b"1", MINUTE).await.unwrap();
        store.set("ns:disease_info:b", b"2", MINUTE).await.unwrap();
        store.set("ns:treatments:a", b"3", MINUTE).await.unwrap();

        assert_eq!(store.delete_prefix("ns:disease_info:").await.unwrap(), 2);
        assert_eq!(store.delete_prefix("ns:disease_info:").await.unwrap(), 0);
        assert!(store.delete("ns:treatments:a").await.unwrap());
        assert!(!store.delete("ns:treatments:a").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let store = Arc::new(MemoryStore::new(1000, TtlPolicy::PerEntry));
        let mut handles = Vec::new();
        for task in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    let key = format!("{}:{}", task, i);
                    store.set(&key, key.as_bytes(), MINUTE).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len_hint().await, Some(400));
    }
}
