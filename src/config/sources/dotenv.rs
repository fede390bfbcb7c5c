//! Dotenv file source
//!
//! The file is parsed with `dotenvy` without touching the process
//! environment. Required keys are checked against the keys exactly as
//! they appear in the file, before any normalization.

use std::path::Path;

use tracing::debug;

use crate::config::error::ConfigError;
use crate::config::options::LoaderOptions;
use crate::config::sources::RawEntries;
use crate::config::validation::ensure_required;

/// Default env file name
pub const DEFAULT_FILENAME: &str = ".env";

/// Read `<directory>/<filename>` into raw entries
pub fn read(options: &LoaderOptions) -> Result<RawEntries, ConfigError> {
    let path = options.source_path(DEFAULT_FILENAME);
    let entries = parse_file(&path)?;

    ensure_required(&options.required, entries.iter().map(|(k, _)| k.as_str()))?;

    debug!(path = %path.display(), entries = entries.len(), "Read dotenv source");
    Ok(entries)
}

fn parse_file(path: &Path) -> Result<RawEntries, ConfigError> {
    let display = path.display().to_string();
    let iter = dotenvy::from_path_iter(path).map_err(|e| map_dotenv_error(&display, e))?;

    iter.map(|item| item.map_err(|e| map_dotenv_error(&display, e)))
        .collect()
}

fn map_dotenv_error(path: &str, err: dotenvy::Error) -> ConfigError {
    match err {
        dotenvy::Error::Io(io_err) => ConfigError::unreadable(path, io_err),
        dotenvy::Error::LineParse(line, idx) => {
            ConfigError::malformed(path, format!("parse error at index {}: {}", idx, line))
        }
        other => ConfigError::malformed(path, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_env(content: &str) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join(".env"), content).expect("Failed to write env file");
        dir
    }

    fn options_for(dir: &TempDir) -> LoaderOptions {
        LoaderOptions::default().with_directory(dir.path())
    }

    #[test]
    fn test_reads_entries() {
        let dir = write_env("DB_HOST=localhost\n# comment\nexport PORT=5432\nNAME=\"my site\"\n");
        let entries = read(&options_for(&dir)).unwrap();

        assert!(entries.contains(&("DB_HOST".to_string(), "localhost".to_string())));
        assert!(entries.contains(&("PORT".to_string(), "5432".to_string())));
        assert!(entries.contains(&("NAME".to_string(), "my site".to_string())));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let result = read(&options_for(&dir));
        assert!(matches!(result, Err(ConfigError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_malformed_line() {
        let dir = write_env("GOOD=1\nthis line is not valid\n");
        let result = read(&options_for(&dir));
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_required_checked_against_raw_keys() {
        let dir = write_env("DB_HOST=localhost\n");

        let ok = read(&options_for(&dir).with_required(["DB_HOST"]));
        assert!(ok.is_ok());

        // keys are lower-cased only after this check runs
        let missing = read(&options_for(&dir).with_required(["db_host"]));
        assert!(matches!(missing, Err(ConfigError::MissingRequired(keys)) if keys == vec!["db_host"]));
    }

    #[test]
    fn test_custom_filename() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.env"), "A=1\n").unwrap();
        let entries = read(&options_for(&dir).with_filename("site.env")).unwrap();
        assert_eq!(entries, vec![("A".to_string(), "1".to_string())]);
    }
}
