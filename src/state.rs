//! Application context shared by request handlers.
//!
//! Built once per process (or per CLI invocation) after the settings have
//! been loaded; the settings are never mutated afterwards.

use std::sync::Arc;

use tracing::info;

use crate::cache::CacheRegistry;
use crate::config::{DatabaseConfig, Settings};
use crate::db::DatabaseRegistry;
use crate::error::{AppResult, ErrorReport};
use crate::logger::CategoryLogger;
use crate::repositories::UserRepository;
use crate::session::{CacheSessionStore, SessionService};

/// Registry name of the database holding the `users` table
pub const DEFAULT_DATABASE: &str = "main";

/// Cache identifier used for session state
pub const SESSION_CACHE: &str = "sessions";

/// Setting selecting the session cache backend (`memory` or `redis`)
pub const SESSION_BACKEND_KEY: &str = "session_backend";

/// Application context containing all shared services and resources.
///
/// Cloning is cheap; every member is reference counted.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub caches: Arc<CacheRegistry>,
    pub databases: Arc<DatabaseRegistry>,
    pub sessions: SessionService,
    pub logger: CategoryLogger,
}

impl AppContext {
    /// Assemble a context from already constructed parts
    pub fn new(
        settings: Arc<Settings>,
        caches: Arc<CacheRegistry>,
        databases: Arc<DatabaseRegistry>,
        sessions: SessionService,
    ) -> Self {
        let logger = CategoryLogger::from_settings(&settings);
        Self {
            settings,
            caches,
            databases,
            sessions,
            logger,
        }
    }

    /// Connect the `database` section, open the session cache and wire
    /// the session service against the `users` table.
    ///
    /// # Example
    /// ```ignore
    /// let settings = Settings::initialize("dotenv", &LoaderOptions::default())?;
    /// let context = AppContext::bootstrap(settings).await?;
    /// ```
    pub async fn bootstrap(settings: Settings) -> AppResult<Self> {
        let settings = Arc::new(settings);
        let caches = Arc::new(CacheRegistry::new());
        let databases = Arc::new(DatabaseRegistry::new());

        let database: DatabaseConfig = settings.section("database")?;
        let pool = databases.open(DEFAULT_DATABASE, &database).await?;

        let backend = settings.get_str(SESSION_BACKEND_KEY).unwrap_or("memory");
        let cache = caches
            .open_from_settings(SESSION_CACHE, backend, &settings)
            .await?;

        let sessions = SessionService::new(
            Arc::new(UserRepository::new(pool)),
            Arc::new(CacheSessionStore::new(cache)),
            &settings,
        );

        info!(
            environment = %settings.environment(),
            session_backend = backend,
            "Application context ready"
        );
        Ok(Self::new(settings, caches, databases, sessions))
    }

    /// Fresh error collector for one request
    pub fn error_report(&self) -> ErrorReport {
        ErrorReport::new(&self.settings, self.logger.clone())
    }
}
