//! Account lookups used by the session service

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::UserRecord;
use crate::repositories::UserRepository;

/// Source of account credentials and profiles
///
/// Both lookups only ever see enabled accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored password hash of an enabled account
    async fn password_hash(&self, username: &str) -> AppResult<Option<String>>;

    /// Profile of an enabled account
    async fn enabled_user(&self, username: &str) -> AppResult<Option<UserRecord>>;
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn password_hash(&self, username: &str) -> AppResult<Option<String>> {
        self.find_password_hash(username).await
    }

    async fn enabled_user(&self, username: &str) -> AppResult<Option<UserRecord>> {
        self.find_enabled_profile(username).await
    }
}
