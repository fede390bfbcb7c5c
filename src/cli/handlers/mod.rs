//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod check;
pub mod hash;

pub use check::CheckCommandHandler;
pub use hash::HashPasswordCommandHandler;

use crate::error::AppError;

/// Failure writing command output
pub(crate) fn output_error(error: std::io::Error) -> AppError {
    AppError::from(anyhow::Error::new(error).context("Failed to write command output"))
}
