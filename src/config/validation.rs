//! Configuration validation logic
//!
//! Required-key checks shared by every source, plus range checks for the
//! typed sections.

use crate::config::error::ConfigError;
use crate::config::sections::{DatabaseConfig, MemoryCacheConfig, RedisCacheConfig};

/// Required keys absent from `present`, in the order they were requested
pub fn missing_keys<'a, I>(required: &[String], present: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: std::collections::HashSet<&str> = present.into_iter().collect();
    required
        .iter()
        .filter(|key| !present.contains(key.as_str()))
        .cloned()
        .collect()
}

/// Fail with `MissingRequired` unless every required key is present
pub fn ensure_required<'a, I>(required: &[String], present: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let missing = missing_keys(required, present);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingRequired(missing))
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must use a PostgreSQL scheme
    /// - Max and min connections must be greater than 0
    /// - Min connections must not exceed max connections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }
}

impl MemoryCacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == 0 {
            return Err(ConfigError::validation(
                "cache.memory.max_size",
                "Memory cache size must be greater than 0.",
            ));
        }
        if self.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "cache.memory.ttl_seconds",
                "Memory cache TTL must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl RedisCacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ConfigError::validation(
                "cache.redis.url",
                "Invalid Redis URL format. Expected format: redis://host[:port][/db]",
            ));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::validation(
                "cache.redis.pool_size",
                "Redis pool size must be greater than 0.",
            ));
        }
        if self.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "cache.redis.ttl_seconds",
                "Redis cache TTL must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}
