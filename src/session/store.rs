//! Session persistence between requests

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{AppCache, CacheError};
use crate::error::AppResult;
use crate::session::state::{SESSION_LIFETIME_SECS, SessionState};

/// Backend that keeps session state between requests
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stored session with this id, if it exists and has not expired
    async fn load(&self, id: &str) -> AppResult<Option<SessionState>>;

    /// Persist the session under its current id
    async fn save(&self, session: &SessionState) -> AppResult<()>;

    /// Forget the session with this id
    async fn destroy(&self, id: &str) -> AppResult<()>;
}

/// Session store on top of any [`AppCache`] handle
pub struct CacheSessionStore {
    cache: Arc<dyn AppCache>,
    ttl_seconds: u64,
}

impl CacheSessionStore {
    pub fn new(cache: Arc<dyn AppCache>) -> Self {
        Self {
            cache,
            ttl_seconds: SESSION_LIFETIME_SECS,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    fn key(id: &str) -> String {
        format!("session:{}", id)
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn load(&self, id: &str) -> AppResult<Option<SessionState>> {
        let Some(bytes) = self.cache.get(&Self::key(id)).await? else {
            return Ok(None);
        };

        match serde_json::from_slice::<SessionState>(&bytes) {
            Ok(session) if session.id() == id => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) => {
                // Unreadable entries are treated as absent and overwritten later
                debug!(error = %e, backend = self.cache.backend_name(), "Discarding corrupt session");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &SessionState) -> AppResult<()> {
        let bytes =
            serde_json::to_vec(session).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache
            .set(&Self::key(session.id()), bytes, Some(self.ttl_seconds))
            .await?;
        Ok(())
    }

    async fn destroy(&self, id: &str) -> AppResult<()> {
        self.cache.remove(&Self::key(id)).await?;
        Ok(())
    }
}
