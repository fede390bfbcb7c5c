//! CLI module for neufw
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Loader options and log level derived from global flags
//! - Command handlers for `check` and `hash-password`

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use executor::{execute_command, record_failure};
pub use parser::{Cli, Commands};
