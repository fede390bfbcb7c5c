//! Named database pools

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::pool::{AsyncDbPool, establish_async_connection_pool};
use crate::error::{AppError, AppResult};

/// Registry of open pools keyed by database name
#[derive(Default)]
pub struct DatabaseRegistry {
    pools: DashMap<String, AsyncDbPool>,
}

impl DatabaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect and register a pool under `name`
    ///
    /// A name can only be opened once until it is closed.
    pub async fn open(&self, name: &str, config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
        if self.pools.contains_key(name) {
            return Err(AppError::duplicate("Database", name));
        }

        let pool = establish_async_connection_pool(config).await?;
        self.register(name, pool)
    }

    pub(crate) fn register(&self, name: &str, pool: AsyncDbPool) -> AppResult<AsyncDbPool> {
        match self.pools.entry(name.to_string()) {
            Entry::Occupied(_) => Err(AppError::duplicate("Database", name)),
            Entry::Vacant(slot) => {
                slot.insert(pool.clone());
                info!(name, "Database opened");
                Ok(pool)
            }
        }
    }

    /// Pool registered under `name`, if any
    pub fn get(&self, name: &str) -> Option<AsyncDbPool> {
        self.pools.get(name).map(|entry| entry.value().clone())
    }

    /// Drop the registry's handle; returns whether `name` was open
    ///
    /// Connections close once every clone of the pool is dropped.
    pub fn close(&self, name: &str) -> bool {
        let removed = self.pools.remove(name).is_some();
        if removed {
            info!(name, "Database closed");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
