use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

use crate::cache::CacheError;
use crate::config::ConfigError;
use crate::logger::LoggerError;

/// Application-wide error type.
///
/// Everything here is fatal for the current request or invocation.
/// Authentication outcomes are plain values and never show up as errors,
/// with the single exception of `Unauthorized`, which callers raise when
/// they need a 401 response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or read
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Cache backend or registry error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Category log could not be written to any sink
    #[error("Logger error: {0}")]
    Logger(#[from] LoggerError),

    /// A named handle is already registered
    #[error("{entity} '{name}' is already open")]
    Duplicate { entity: String, name: String },

    /// Unauthorized access error with authentication message
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn database<S: Into<String>>(operation: S, source: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.into(),
            source: source.into(),
        }
    }

    pub fn duplicate<E: Into<String>, N: Into<String>>(entity: E, name: N) -> Self {
        AppError::Duplicate {
            entity: entity.into(),
            name: name.into(),
        }
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        AppError::Unauthorized {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        AppError::database("database operation", error)
    }
}

impl From<PoolError> for AppError {
    fn from(error: PoolError) -> Self {
        AppError::ConnectionPool {
            source: error.into(),
        }
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
