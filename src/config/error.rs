//! Configuration error types

use thiserror::Error;

/// Configuration error types
///
/// Every variant is fatal for the current invocation: the caller is
/// expected to log it and stop.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source file missing or unreadable
    #[error("Configuration source unreadable: {path} ({reason})")]
    SourceUnreadable {
        /// Path of the source that could not be read
        path: String,
        /// Underlying reason
        reason: String,
    },

    /// Source could be read but not parsed
    #[error("Malformed configuration source {source_name}: {message}")]
    Malformed {
        /// Source path or label
        source_name: String,
        /// Parser message
        message: String,
    },

    /// One or more required keys are absent after loading
    #[error("Missing required configuration keys: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// Nothing ended up in the store
    #[error("Configuration store is empty after loading")]
    Empty,

    /// Dotted lookup walked into a scalar
    #[error("Cannot look up '{key}': segment '{segment}' is not a section")]
    Lookup {
        /// Full dotted key
        key: String,
        /// Segment that resolved to a non-map value
        segment: String,
    },

    /// A section could not be turned into a typed struct
    #[error("Failed to deserialize configuration section '{section}': {message}")]
    Deserialize {
        /// Section key
        section: String,
        /// Serde message
        message: String,
    },

    /// Validation error with field and message
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// The validation error message
        message: String,
    },
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unreadable-source error
    pub fn unreadable<P: Into<String>, R: ToString>(path: P, reason: R) -> Self {
        ConfigError::SourceUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new malformed-source error
    pub fn malformed<S: Into<String>, M: ToString>(source_name: S, message: M) -> Self {
        ConfigError::Malformed {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a new missing-required error from the absent keys
    pub fn missing_required<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigError::MissingRequired(keys.into_iter().map(Into::into).collect())
    }
}
