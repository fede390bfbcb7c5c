//! Memory cache implementation using cached::TimedSizedCache.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};

use crate::cache::{AppCache, CacheError};
use crate::config::MemoryCacheConfig;

/// Upper bound on any entry's lifetime; per-entry TTLs are tracked separately
const MAX_LIFESPAN: Duration = Duration::from_secs(86400 * 30);

#[derive(Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// In-process cache with a size limit and per-entry TTL.
pub struct MemoryCache {
    store: Mutex<TimedSizedCache<String, CacheEntry>>,
    default_ttl: u64,
}

impl MemoryCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let store = TimedSizedCache::with_size_and_lifespan(config.max_size, MAX_LIFESPAN);
        Self {
            store: Mutex::new(store),
            default_ttl: config.ttl_seconds,
        }
    }
}

#[async_trait]
impl AppCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;

        let key_string = key.to_string();
        let entry = store.cache_get(&key_string).cloned();
        match entry {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value)),
            Some(_) => {
                store.cache_remove(&key_string);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let ttl = Duration::from_secs(ttl_seconds.unwrap_or(self.default_ttl)).min(MAX_LIFESPAN);
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.cache_set(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.cache_remove(&key.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.cache_clear();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> MemoryCacheConfig {
        MemoryCacheConfig {
            max_size: 10,
            ttl_seconds: 3600,
        }
    }

    #[tokio::test]
    async fn test_get_set() {
        let cache = MemoryCache::new(&test_config());
        cache.set("key", b"value".to_vec(), None).await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(cache.get("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove() {
        let cache = MemoryCache::new(&test_config());
        cache.set("key", b"value".to_vec(), None).await.unwrap();
        cache.remove("key").await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let cache = MemoryCache::new(&test_config());
        cache.set("key", b"value".to_vec(), Some(1)).await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), Some(b"value".to_vec()));
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new(&test_config());
        cache.set("k1", b"v1".to_vec(), None).await.unwrap();
        cache.set("k2", b"v2".to_vec(), None).await.unwrap();
        cache.clear().await.unwrap();
        assert_eq!(cache.get("k1").await.unwrap(), None);
        assert_eq!(cache.get("k2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_size_limit_evicts() {
        let cache = MemoryCache::new(&MemoryCacheConfig {
            max_size: 1,
            ttl_seconds: 60,
        });
        cache.set("k1", b"v1".to_vec(), None).await.unwrap();
        cache.set("k2", b"v2".to_vec(), None).await.unwrap();
        assert_eq!(cache.get("k1").await.unwrap(), None);
        assert_eq!(cache.get("k2").await.unwrap(), Some(b"v2".to_vec()));
    }
}
