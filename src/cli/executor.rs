//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing.

use std::io::Write;

use super::handlers::{CheckCommandHandler, HashPasswordCommandHandler};
use super::parser::{Cli, Commands};
use tracing::error;

use crate::config::Settings;
use crate::error::{AppError, AppResult, ErrorReport, full_message};
use crate::logger::CategoryLogger;

/// Execute a CLI command, writing its output to `out`
///
/// `settings` are the ones already loaded for this invocation, if any;
/// commands that need settings load them when none are given.
///
/// # Errors
/// Returns errors from command handlers; configuration problems surface
/// as `AppError::Configuration`.
pub fn execute_command<W: Write>(
    cli: &Cli,
    settings: Option<&Settings>,
    out: &mut W,
) -> AppResult<()> {
    match &cli.command {
        Commands::Check { show } => {
            let handler = CheckCommandHandler::new(cli.mechanism, cli.loader_options());
            match settings {
                Some(settings) => handler.execute(settings, *show, out),
                None => handler.execute(&cli.load_settings()?, *show, out),
            }
        }
        Commands::HashPassword { password } => {
            HashPasswordCommandHandler::new(password).execute(out)
        }
    }
}

/// Write a failed invocation to tracing and, when it exists, the `error`
/// category log
///
/// Without loaded settings the defaults derived from `--root` locate the
/// logs directory.
pub fn record_failure(cli: &Cli, settings: Option<&Settings>, failure: &AppError) {
    let defaults;
    let settings = match settings {
        Some(settings) => settings,
        None => {
            defaults = Settings::with_defaults(&cli.loader_options());
            &defaults
        }
    };

    let logger = CategoryLogger::from_settings(settings);
    if logger.directory().is_dir() {
        ErrorReport::new(settings, logger).report_fatal("neufw", failure);
    } else {
        error!("{}", full_message(failure));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::AppError;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_execute_check() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("site.env"), "SITE_NAME=neu\n").unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "neufw",
            "--root",
            dir_arg,
            "--directory",
            dir_arg,
            "--filename",
            "site.env",
            "check",
            "--show",
        ])
        .unwrap();

        let mut out = Vec::new();
        execute_command(&cli, None, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("site_name = neu"));
    }

    #[test]
    fn test_execute_check_missing_source() {
        let dir = TempDir::new().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["neufw", "--directory", dir_arg, "check"]).unwrap();

        let result = execute_command(&cli, None, &mut Vec::new());
        assert!(matches!(
            result,
            Err(AppError::Configuration(ConfigError::SourceUnreadable { .. }))
        ));
    }

    #[test]
    fn test_execute_check_with_loaded_settings() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from([
            "neufw",
            "--directory",
            dir.path().to_str().unwrap(),
            "check",
            "--show",
        ])
        .unwrap();
        let mut settings = Settings::with_defaults(&cli.loader_options());
        settings.set("site_name", "preloaded");

        let mut out = Vec::new();
        execute_command(&cli, Some(&settings), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("site_name = preloaded"));
    }

    #[test]
    fn test_failure_recorded_under_root_logs() {
        let dir = TempDir::new().unwrap();
        let logs = dir.path().join("app").join("logs");
        std::fs::create_dir_all(&logs).unwrap();
        let cli =
            Cli::try_parse_from(["neufw", "--root", dir.path().to_str().unwrap(), "check"]).unwrap();

        record_failure(&cli, None, &AppError::from(ConfigError::Empty));

        let content = std::fs::read_to_string(logs.join("error.log")).unwrap();
        assert!(content.contains(&ConfigError::Empty.to_string()));
    }

    #[test]
    fn test_failure_without_logs_directory_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cli =
            Cli::try_parse_from(["neufw", "--root", dir.path().to_str().unwrap(), "check"]).unwrap();

        record_failure(&cli, None, &AppError::from(ConfigError::Empty));

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_execute_hash_password() {
        let cli = Cli::try_parse_from(["neufw", "hash-password", "pw"]).unwrap();

        let mut out = Vec::new();
        execute_command(&cli, None, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("$argon2"));
    }
}
