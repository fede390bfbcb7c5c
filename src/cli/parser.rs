//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::build;
use crate::config::{LoaderOptions, Mechanism, Settings};
use crate::error::AppResult;
use crate::logger::{CategoryLogger, ConsoleConfig, FileConfig, LoggerConfig};

/// Configuration and session tooling for neufw applications
#[derive(Parser, Debug)]
#[command(name = "neufw")]
#[command(about = "Configuration and session tooling for neufw applications")]
#[command(long_about = "
neufw loads application settings from a dotenv file, a flat JSON file or
CONFIG_* environment variables, and provides helpers for the session/auth
layer.

EXAMPLES:
    # Load app/.env and report what was found
    neufw check

    # Load a JSON file and print every setting
    neufw --mechanism json --directory ./conf --filename site.json check --show

    # Fail unless the required keys are present
    neufw --require DB_NAME --require DB_USER check

    # Produce a password hash for the users table
    neufw hash-password 'correct horse battery staple'
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Settings source: dotenv, json or env
    #[arg(
        short,
        long,
        default_value = "dotenv",
        value_parser = super::validation::validate_mechanism
    )]
    pub mechanism: Mechanism,

    /// Application root; default directories are derived from it
    ///
    /// Defaults to the current working directory.
    #[arg(long, value_name = "DIR", env = "NEUFW_ROOT", value_parser = super::validation::validate_directory)]
    pub root: Option<PathBuf>,

    /// Directory containing the settings file
    ///
    /// Defaults to `<root>/app`. Ignored by the env mechanism.
    #[arg(short, long, value_name = "DIR", value_parser = super::validation::validate_directory)]
    pub directory: Option<PathBuf>,

    /// Settings file name (defaults: `.env`, `config.json`)
    #[arg(short, long, value_name = "FILE")]
    pub filename: Option<String>,

    /// Setting that must be present; repeat for several keys
    #[arg(short = 'r', long = "require", value_name = "KEY", value_parser = super::validation::validate_setting_key)]
    pub require: Vec<String>,

    /// Keep keys exactly as written instead of lower-casing them
    #[arg(long)]
    pub keep_case: bool,

    /// Store every value as a string
    #[arg(long)]
    pub no_literal_types: bool,

    /// Expand dotted keys into nested sections (dotenv only)
    #[arg(long)]
    pub multidimensional: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the settings and report the result
    ///
    /// Exits non-zero when the source is missing or malformed, a required
    /// key is absent, or a typed section (`database`, `cache.memory`,
    /// `cache.redis`) holds invalid values.
    Check {
        /// Print every loaded setting as `key = value`
        #[arg(long)]
        show: bool,
    },
    /// Hash a password with Argon2id for storage in `users.password`
    HashPassword {
        /// Plain text password
        password: String,
    },
}

impl Cli {
    /// Loader options described by the global flags
    pub fn loader_options(&self) -> LoaderOptions {
        let mut options = LoaderOptions::default()
            .with_required(self.require.iter().cloned())
            .with_lowercase_keys(!self.keep_case)
            .with_literal_types(!self.no_literal_types)
            .with_multidimensional(self.multidimensional);

        if let Some(root) = &self.root {
            options = options.with_document_root(root.clone());
        }
        if let Some(directory) = &self.directory {
            options = options.with_directory(directory.clone());
        }
        if let Some(filename) = &self.filename {
            options = options.with_filename(filename.clone());
        }
        options
    }

    /// Log level selected by `--verbose` / `--quiet`
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Load the settings the global flags describe
    pub fn load_settings(&self) -> AppResult<Settings> {
        Ok(Settings::initialize(
            self.mechanism.as_str(),
            &self.loader_options(),
        )?)
    }

    /// Logger for this invocation
    ///
    /// A valid `logger` section in the loaded settings is used as is, with a
    /// relative file path placed under `logs_directory`. Without one the CLI
    /// logs warnings to the console. `--verbose` / `--quiet` always win.
    pub fn logger_config(&self, settings: Option<&Settings>) -> LoggerConfig {
        let configured = settings
            .filter(|settings| !settings.section_map("logger").is_empty())
            .and_then(|settings| {
                let mut config = settings.section::<LoggerConfig>("logger").ok()?;
                if config.file.path.is_relative() {
                    let directory = CategoryLogger::from_settings(settings);
                    config.file.path = directory.directory().join(&config.file.path);
                }
                Some(config)
            });

        let mut config = configured.unwrap_or_else(|| LoggerConfig {
            console: ConsoleConfig::new(true, true),
            file: FileConfig::default(),
            level: "warn".to_string(),
        });
        if self.verbose || self.quiet {
            config.level = self.log_level().to_string();
        }
        config
    }
}

impl Commands {
    /// Whether the command runs against loaded settings
    pub fn uses_settings(&self) -> bool {
        matches!(self, Commands::Check { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let result = Cli::try_parse_from(["neufw", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["neufw", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_subcommand_required() {
        let result = Cli::try_parse_from(["neufw"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["neufw", "check"]).unwrap();
        assert_eq!(cli.mechanism, Mechanism::Dotenv);
        assert!(cli.require.is_empty());
        assert!(matches!(cli.command, Commands::Check { show: false }));

        let options = cli.loader_options();
        assert!(options.lowercase_keys);
        assert!(options.literal_types);
        assert!(!options.multidimensional);
        assert!(options.directory.is_none());
    }

    #[test]
    fn test_loader_flags() {
        let dir = TempDir::new().unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "neufw",
            "--mechanism",
            "JSON",
            "--directory",
            dir_arg,
            "--filename",
            "site.json",
            "--require",
            "DB_NAME",
            "-r",
            "DB_USER",
            "--keep-case",
            "--no-literal-types",
            "--multidimensional",
            "check",
            "--show",
        ])
        .unwrap();

        assert_eq!(cli.mechanism, Mechanism::Json);
        assert!(matches!(cli.command, Commands::Check { show: true }));

        let options = cli.loader_options();
        assert_eq!(options.directory.as_deref(), Some(dir.path()));
        assert_eq!(options.filename.as_deref(), Some("site.json"));
        assert_eq!(options.required, vec!["DB_NAME", "DB_USER"]);
        assert!(!options.lowercase_keys);
        assert!(!options.literal_types);
        assert!(options.multidimensional);
    }

    #[test]
    fn test_unknown_mechanism_rejected() {
        let result = Cli::try_parse_from(["neufw", "--mechanism", "yaml", "check"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_hash_password_command() {
        let cli = Cli::try_parse_from(["neufw", "hash-password", "s3cret"]).unwrap();
        match cli.command {
            Commands::HashPassword { password } => assert_eq!(password, "s3cret"),
            other => panic!("Expected HashPassword command, got {:?}", other),
        }
    }

    #[test]
    fn test_log_level_flags() {
        assert_eq!(Cli::try_parse_from(["neufw", "check"]).unwrap().log_level(), "warn");
        assert_eq!(
            Cli::try_parse_from(["neufw", "--verbose", "check"])
                .unwrap()
                .log_level(),
            "debug"
        );
        assert_eq!(
            Cli::try_parse_from(["neufw", "-q", "check"]).unwrap().log_level(),
            "error"
        );
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let result = Cli::try_parse_from(["neufw", "--verbose", "--quiet", "check"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_logger_config_is_valid() {
        let cli = Cli::try_parse_from(["neufw", "check"]).unwrap();
        let config = cli.logger_config(None);
        assert!(config.validate().is_ok());
        assert!(!config.file.enabled);
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_logger_section_enables_file_output() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "LOGGER.LEVEL=debug\nLOGGER.FILE.ENABLED=1\nLOGGER.FILE.FORMAT=compact\n",
        )
        .unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli =
            Cli::try_parse_from(["neufw", "--root", dir_arg, "--directory", dir_arg, "check"])
                .unwrap();

        let settings = cli.load_settings().unwrap();
        let config = cli.logger_config(Some(&settings));

        assert_eq!(config.level, "debug");
        assert!(config.file.enabled);
        assert_eq!(config.file.format, crate::logger::LogFormat::Compact);
        assert_eq!(
            config.file.path,
            dir.path().join("app").join("logs").join("neufw.log")
        );
    }

    #[test]
    fn test_quiet_overrides_logger_section() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), "LOGGER.LEVEL=debug\n").unwrap();
        let dir_arg = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["neufw", "-q", "--directory", dir_arg, "check"]).unwrap();

        let settings = cli.load_settings().unwrap();
        assert_eq!(cli.logger_config(Some(&settings)).level, "error");
    }

    #[test]
    fn test_only_check_uses_settings() {
        assert!(Cli::try_parse_from(["neufw", "check"]).unwrap().command.uses_settings());
        assert!(
            !Cli::try_parse_from(["neufw", "hash-password", "pw"])
                .unwrap()
                .command
                .uses_settings()
        );
    }
}
