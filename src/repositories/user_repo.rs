//! User repository for async database operations.
//!
//! Read-only lookups against the `users` table; only enabled accounts are
//! ever returned.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{AccountStatus, UserRecord};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Stored password hash of an enabled account.
    ///
    /// # Returns
    /// `None` when the account does not exist or is disabled
    pub async fn find_password_hash(&self, user_name: &str) -> Result<Option<String>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(username.eq(user_name))
            .filter(status.eq(AccountStatus::Enabled.value()))
            .select(password)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::database("fetch password hash", e))
    }

    /// Profile of an enabled account.
    ///
    /// # Returns
    /// `None` when the account does not exist or is disabled
    pub async fn find_enabled_profile(
        &self,
        user_name: &str,
    ) -> Result<Option<UserRecord>, AppError> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .filter(username.eq(user_name))
            .filter(status.eq(AccountStatus::Enabled.value()))
            .select(UserRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::database("fetch user profile", e))
    }
}
