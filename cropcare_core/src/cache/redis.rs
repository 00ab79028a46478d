//! Redis-backed external cache tier.

use super::store::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::future::Future;
use std::time::Duration;

/// External tier speaking PING/GET/SETEX/DEL/KEYS over a managed connection
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStore {
    /// Open a managed connection and verify it with a PING.
    pub async fn connect(
        url: &str,
        connect_timeout: Duration,
        op_timeout: Duration,
    ) -> StoreResult<Self> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let conn = match tokio::time::timeout(connect_timeout, ConnectionManager::new(client)).await
        {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => return Err(StoreError::Unavailable(e.to_string())),
            Err(_) => {
                return Err(StoreError::Timeout {
                    op: "connect",
                    after: connect_timeout,
                })
            }
        };

        let store = Self { conn, op_timeout };
        store.ping().await?;
        tracing::info!(url = %url, "connected to redis");
        Ok(store)
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) if e.is_connection_dropped() || e.is_io_error() => {
                Err(StoreError::Unavailable(e.to_string()))
            }
            Ok(Err(e)) => Err(StoreError::Command(e.to_string())),
            Err(_) => Err(StoreError::Timeout {
                op,
                after: self.op_timeout,
            }),
        }
    }
}

/// Escape glob metacharacters so a prefix matches literally in KEYS
fn glob_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl KeyValueStore for RedisStore {
    fn tier(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        self.bounded("GET", async move {
            let value: Option<Vec<u8>> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
            Ok(value)
        })
        .await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        // SETEX rejects a zero TTL
        let secs = ttl.as_secs().max(1);
        self.bounded("SETEX", async move {
            let _: () = redis::cmd("SETEX")
                .arg(key)
                .arg(secs)
                .arg(value)
                .query_async(&mut conn)
                .await?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        self.bounded("DEL", async move {
            let removed: u64 = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_prefix(&self, prefix: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        let pattern = glob_prefix(prefix);
        self.bounded("KEYS/DEL", async move {
            let keys: Vec<String> = redis::cmd("KEYS").arg(&pattern).query_async(&mut conn).await?;
            if keys.is_empty() {
                return Ok(0);
            }
            let removed: u64 = redis::cmd("DEL").arg(&keys).query_async(&mut conn).await?;
            Ok(removed)
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        self.bounded("PING", async move {
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_prefix_escapes_metacharacters() {
        assert_eq!(glob_prefix("crop_api:disease_info:"), "crop_api:disease_info:*");
        assert_eq!(glob_prefix("a*b?[c]"), "a\\*b\\?\\[c\\]*");
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_server_fails() {
        let result = RedisStore::connect(
            "redis://127.0.0.1:1/0",
            Duration::from_millis(500),
            Duration::from_millis(200),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_is_unavailable() {
        let result = RedisStore::connect(
            "not-a-url",
            Duration::from_millis(100),
            Duration::from_millis(100),
        )
        .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
