//! CLI argument validation functions
//!
//! Value parsers for arguments that clap cannot check on its own.

use std::path::PathBuf;

use crate::config::Mechanism;

/// Validate the settings source name (case-insensitive)
pub fn validate_mechanism(value: &str) -> Result<Mechanism, String> {
    value.parse()
}

/// Validate that a directory exists
pub fn validate_directory(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Directory does not exist: '{}'", path_str));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: '{}'", path_str));
    }

    Ok(path)
}

/// Validate a required setting key: non-empty, no whitespace
pub fn validate_setting_key(key: &str) -> Result<String, String> {
    if key.is_empty() {
        return Err("Setting key cannot be empty".to_string());
    }

    if key.chars().any(char::is_whitespace) {
        return Err(format!("Setting key cannot contain whitespace: '{}'", key));
    }

    Ok(key.to_string())
}
