//! Cache module providing named cache handles over multiple backends.
//!
//! Supported backends:
//! - Memory cache (in-process, fastest)
//! - Redis cache (distributed, network-based)
//!
//! # Configuration
//!
//! Backend settings are read from the `cache.<backend>` section:
//!
//! ```text
//! CACHE.MEMORY.MAX_SIZE=1000
//! CACHE.MEMORY.TTL_SECONDS=300
//! CACHE.REDIS.URL=redis://127.0.0.1:6379
//! CACHE.REDIS.POOL_SIZE=4
//! CACHE.REDIS.KEY_PREFIX=neufw
//! ```

mod error;
mod memory;
mod redis;
mod registry;
mod traits;

pub use self::error::CacheError;
pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;
pub use self::registry::CacheRegistry;
pub use self::traits::AppCache;

// Re-export config types
pub use crate::config::{CacheBackend, CacheDetails, MemoryCacheConfig, RedisCacheConfig};
