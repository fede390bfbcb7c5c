//! Tests for the logger module

use crate::logger::category::*;
use crate::logger::config::*;
use crate::logger::writer::{LogFileWriter, RecoveryStrategy};
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;

    fn create_test_config() -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig {
                enabled: true,
                colored: false,
            },
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("test.log"),
                append: true,
                format: LogFormat::Full,
            },
            level: "info".to_string(),
        }
    }

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(config.console.colored);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = create_test_config();
        assert!(config.validate().is_ok());

        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = create_test_config();
        config.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_file_path_rejected_when_enabled() {
        let mut config = create_test_config();
        config.file.enabled = true;
        config.file.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        use std::str::FromStr;
        assert_eq!(LogFormat::from_str("full").unwrap(), LogFormat::Full);
        assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_deserialize_from_partial_section() {
        let config: LoggerConfig = serde_json::from_value(serde_json::json!({
            "level": "debug",
            "file": { "enabled": true, "format": "json" }
        }))
        .unwrap();

        assert_eq!(config.level, "debug");
        assert!(config.console.enabled);
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Json);
        assert!(config.file.append);
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    fn file_config(path: PathBuf) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append: true,
            format: LogFormat::Full,
        }
    }

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("app.log");

        let writer = LogFileWriter::new(&file_config(path.clone())).unwrap();
        {
            let mut guard = writer.make_writer();
            guard.write_all(b"hello\n").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "first\n").unwrap();

        let writer = LogFileWriter::new(&file_config(path.clone())).unwrap();
        {
            let mut guard = writer.make_writer();
            guard.write_all(b"second\n").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_writer_truncates_without_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "stale\n").unwrap();

        let mut config = file_config(path.clone());
        config.append = false;
        let writer =
            LogFileWriter::with_recovery(&config, RecoveryStrategy::SilentDrop, None).unwrap();
        {
            let mut guard = writer.make_writer();
            guard.write_all(b"fresh\n").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_try_recover_outside_fallback_is_noop() {
        let dir = TempDir::new().unwrap();
        let writer = LogFileWriter::new(&file_config(dir.path().join("app.log"))).unwrap();
        assert!(!writer.try_recover());
    }
}

#[cfg(test)]
mod category_tests {
    use super::*;
    use crate::logger::LoggerError;
    use jiff::Timestamp;
    use jiff::tz::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_write_appends_lines() {
        let dir = TempDir::new().unwrap();
        let logger = CategoryLogger::new(dir.path());

        logger.write("first", "error").unwrap();
        logger.write("second", "error").unwrap();

        let content = std::fs::read_to_string(dir.path().join("error.log")).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_categories_are_separate_files() {
        let dir = TempDir::new().unwrap();
        let logger = CategoryLogger::new(dir.path());

        logger.write("old api", "deprecated").unwrap();
        logger.write("boom", "error").unwrap();

        assert_eq!(logger.path_for("deprecated"), dir.path().join("deprecated.log"));
        assert!(
            std::fs::read_to_string(dir.path().join("deprecated.log"))
                .unwrap()
                .contains("old api")
        );
        assert!(
            !std::fs::read_to_string(dir.path().join("error.log"))
                .unwrap()
                .contains("old api")
        );
    }

    #[test]
    fn test_fallback_file_used_when_directory_missing() {
        let dir = TempDir::new().unwrap();
        let fallback = dir.path().join("fallback.log");
        let logger = CategoryLogger::new(dir.path().join("missing"))
            .with_fallback(FallbackSink::File(fallback.clone()));

        logger.write("still recorded", "error").unwrap();

        let content = std::fs::read_to_string(&fallback).unwrap();
        assert!(content.starts_with("NOTICE: Was unable to write to"));
        assert!(content.ends_with("still recorded\n"));
    }

    #[test]
    fn test_error_when_fallback_also_fails() {
        let dir = TempDir::new().unwrap();
        let logger = CategoryLogger::new(dir.path().join("missing"))
            .with_fallback(FallbackSink::File(dir.path().join("also_missing").join("x.log")));

        let result = logger.write("lost", "error");
        assert!(matches!(result, Err(LoggerError::Unwritable { .. })));
    }

    #[test]
    fn test_dated_line_format() {
        // 2024-03-07T19:05:09Z is 14:05:09 in New York (EST)
        let instant: Timestamp = "2024-03-07T19:05:09Z".parse().unwrap();
        let now = instant.to_zoned(TimeZone::UTC);

        let line = dated_line(&now, "boom");
        let expected_ny = "Mar/07/2024 14:05:09 | boom";
        let expected_utc = "Mar/07/2024 19:05:09 | boom";
        // hosts without a tz database fall back to UTC
        assert!(line == expected_ny || line == expected_utc, "got {}", line);
    }

    #[test]
    fn test_write_dated_prefixes_timestamp() {
        let dir = TempDir::new().unwrap();
        let logger = CategoryLogger::new(dir.path());
        logger.write_dated("dated message", DEFAULT_CATEGORY).unwrap();

        let content = std::fs::read_to_string(dir.path().join("debug.log")).unwrap();
        let (stamp, message) = content.trim_end().split_once(" | ").unwrap();
        assert_eq!(message, "dated message");
        assert_eq!(stamp.len(), "Mar/07/2024 14:05:09".len());
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;
    use crate::logger::build_dispatch;
    use tempfile::TempDir;

    fn file_logger(format: LogFormat, path: PathBuf, console: bool) -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig::new(console, false),
            file: FileConfig {
                enabled: true,
                path,
                append: true,
                format,
            },
            level: "info".to_string(),
        }
    }

    fn assert_events_reach_file(console: bool) {
        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("neufw.log");
            let dispatch = build_dispatch(&file_logger(format, path.clone(), console)).unwrap();

            tracing::dispatcher::with_default(&dispatch, || {
                tracing::info!("written as {}", format.as_str());
                tracing::debug!("filtered out");
            });

            let content = std::fs::read_to_string(&path).unwrap();
            assert!(
                content.contains(&format!("written as {}", format.as_str())),
                "{} output: {}",
                format.as_str(),
                content
            );
            assert!(!content.contains("filtered out"));
        }
    }

    #[test]
    fn test_console_and_file_output_for_every_format() {
        assert_events_reach_file(true);
    }

    #[test]
    fn test_file_only_output_for_every_format() {
        assert_events_reach_file(false);
    }

    #[test]
    fn test_no_output_rejected() {
        let mut config = file_logger(LogFormat::Full, PathBuf::from("x.log"), false);
        config.file.enabled = false;
        assert!(build_dispatch(&config).is_err());
    }
}
