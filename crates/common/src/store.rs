//! Key-value store collaborator
//!
//! Contracts never persist anything themselves. Every read and write goes
//! through a [`KeyValueStore`], which is assumed to make each `put`
//! immediately visible to the next `get`.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{Error, Result};

/// Exact-key byte store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` if the key was never written
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Write every entry or none of them
    async fn put_all(&self, entries: &[(&str, &[u8])]) -> Result<()>;

    /// Read the value under `key`, failing with [`Error::NotFound`] if absent
    async fn get_required(&self, key: &str) -> Result<Vec<u8>> {
        self.get(key)
            .await?
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }
}

/// In-process store backed by a map
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn put_all(&self, entries: &[(&str, &[u8])]) -> Result<()> {
        let mut map = self.entries.lock().await;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }
}

/// Redis-backed store
///
/// Keys are prefixed with a namespace (`<namespace>:<key>`) so several
/// contracts can share one Redis database without colliding.
pub struct RedisStore {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisStore {
    /// Connect to Redis and scope all keys under `namespace`
    pub async fn new(redis_url: &str, namespace: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        info!("Connected to Redis at {} (namespace: {})", redis_url, namespace);

        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = self.scoped(key);
        let mut conn = self.conn.clone();

        let value: Option<Vec<u8>> = conn.get(&key).await?;
        debug!("GET {} ({})", key, if value.is_some() { "hit" } else { "miss" });
        Ok(value)
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let key = self.scoped(key);
        let mut conn = self.conn.clone();

        let _: () = conn.set(&key, value).await?;
        debug!("SET {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn put_all(&self, entries: &[(&str, &[u8])]) -> Result<()> {
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.set(self.scoped(key), *value).ignore();
        }

        let mut conn = self.conn.clone();
        let _: () = pipe.query_async(&mut conn).await?;
        debug!("MULTI/EXEC {} keys under {}", entries.len(), self.namespace);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_put_then_get() {
        let store = MemoryStore::new();
        store.put("rec1", b"payload").await.unwrap();

        assert_eq!(store.get("rec1").await.unwrap(), Some(b"payload".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_put_overwrites() {
        let store = MemoryStore::new();
        store.put("rec1", b"first").await.unwrap();
        store.put("rec1", b"second").await.unwrap();

        assert_eq!(store.get_required("rec1").await.unwrap(), b"second".to_vec());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_put_all_writes_every_entry() {
        let store = MemoryStore::new();
        store
            .put_all(&[("a", b"one".as_slice()), ("b", b"two".as_slice())])
            .await
            .unwrap();

        assert_eq!(store.get_required("a").await.unwrap(), b"one".to_vec());
        assert_eq!(store.get_required("b").await.unwrap(), b"two".to_vec());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_required_missing_key() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let err = store.get_required("absent").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(key) if key == "absent"));
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_redis_namespaced_roundtrip() {
        let healthcare = RedisStore::new("redis://127.0.0.1:6379/15", "healthcare")
            .await
            .unwrap();
        let privatekey = RedisStore::new("redis://127.0.0.1:6379/15", "privatekey")
            .await
            .unwrap();

        healthcare.put("shared", b"from-healthcare").await.unwrap();
        privatekey.put("shared", b"from-privatekey").await.unwrap();

        assert_eq!(
            healthcare.get("shared").await.unwrap(),
            Some(b"from-healthcare".to_vec())
        );
        assert_eq!(
            privatekey.get("shared").await.unwrap(),
            Some(b"from-privatekey".to_vec())
        );
    }

    #[tokio::test]
    #[ignore] // Requires Redis to be running
    async fn test_redis_put_all() {
        let store = RedisStore::new("redis://127.0.0.1:6379/15", "batch")
            .await
            .unwrap();

        store
            .put_all(&[("x", b"1".as_slice()), ("y", b"2".as_slice())])
            .await
            .unwrap();

        assert_eq!(store.get("x").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get("y").await.unwrap(), Some(b"2".to_vec()));
    }
}
