//! Named cache handles
//!
//! Each handle is opened once under an identifier and then looked up by
//! that identifier for the rest of the invocation.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use crate::cache::memory::MemoryCache;
use crate::cache::redis::RedisCache;
use crate::cache::{AppCache, CacheError};
use crate::config::{CacheBackend, CacheDetails, MemoryCacheConfig, RedisCacheConfig, Settings};

/// Registry of open cache handles keyed by identifier
#[derive(Default)]
pub struct CacheRegistry {
    handles: DashMap<String, Arc<dyn AppCache>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a cache handle under `identifier`
    ///
    /// Fails with `CacheError::Duplicate` if the identifier is taken.
    pub async fn open(
        &self,
        identifier: &str,
        details: CacheDetails,
    ) -> Result<Arc<dyn AppCache>, CacheError> {
        if self.handles.contains_key(identifier) {
            return Err(CacheError::Duplicate(identifier.to_string()));
        }

        let handle: Arc<dyn AppCache> = match &details {
            CacheDetails::Memory(config) => Arc::new(MemoryCache::new(config)),
            CacheDetails::Redis(config) => Arc::new(RedisCache::new(config, identifier).await?),
        };

        match self.handles.entry(identifier.to_string()) {
            Entry::Occupied(_) => Err(CacheError::Duplicate(identifier.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(handle.clone());
                info!(identifier, backend = %details.backend(), "Cache opened");
                Ok(handle)
            }
        }
    }

    /// Open a cache handle using the `cache.<backend>` section of `settings`
    pub async fn open_from_settings(
        &self,
        identifier: &str,
        backend: &str,
        settings: &Settings,
    ) -> Result<Arc<dyn AppCache>, CacheError> {
        let backend: CacheBackend = backend.parse().map_err(CacheError::UnsupportedBackend)?;
        let section = format!("cache.{}", backend);

        let details = match backend {
            CacheBackend::Memory => {
                let config: MemoryCacheConfig = settings
                    .section(&section)
                    .map_err(|e| CacheError::Connection(e.to_string()))?;
                config
                    .validate()
                    .map_err(|e| CacheError::Connection(e.to_string()))?;
                CacheDetails::Memory(config)
            }
            CacheBackend::Redis => {
                let config: RedisCacheConfig = settings
                    .section(&section)
                    .map_err(|e| CacheError::Connection(e.to_string()))?;
                config
                    .validate()
                    .map_err(|e| CacheError::Connection(e.to_string()))?;
                CacheDetails::Redis(config)
            }
        };

        self.open(identifier, details).await
    }

    /// Look up an open handle
    pub fn get(&self, identifier: &str) -> Result<Arc<dyn AppCache>, CacheError> {
        self.handles
            .get(identifier)
            .map(|handle| handle.value().clone())
            .ok_or_else(|| CacheError::NotFound(identifier.to_string()))
    }

    /// Drop a handle; returns whether one was open
    pub fn close(&self, identifier: &str) -> bool {
        let closed = self.handles.remove(identifier).is_some();
        debug!(identifier, closed, "Cache close requested");
        closed
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.handles.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
