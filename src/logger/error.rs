//! Error types for the logger

use thiserror::Error;

/// Errors that can occur in the logger system
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Neither the category file nor the fallback sink accepted the line
    #[error("Unable to write to {path} or the fallback sink; check log permissions")]
    Unwritable { path: String },
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn unwritable(path: impl Into<String>) -> Self {
        Self::Unwritable { path: path.into() }
    }
}
