//! Category log files
//!
//! Plain append-only files under the `logs_directory` setting, one per
//! category (`error.log`, `deprecated.log`, `debug.log`, ...). These are
//! separate from the tracing subscriber and are meant for operators
//! tailing a specific stream.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jiff::Zoned;
use jiff::tz::TimeZone;
use tracing::warn;

use crate::config::Settings;
use crate::logger::error::LoggerError;

/// Category used when none is given
pub const DEFAULT_CATEGORY: &str = "debug";

/// Time zone of dated log lines
pub const LOG_TIMEZONE: &str = "America/New_York";

/// Timestamp layout of dated log lines, e.g. `Mar/07/2026 14:05:09`
pub const TIMESTAMP_FORMAT: &str = "%b/%d/%Y %H:%M:%S";

/// Where lines go when the category file cannot be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackSink {
    Stderr,
    File(PathBuf),
}

/// Writer for `<directory>/<category>.log` files
#[derive(Debug, Clone)]
pub struct CategoryLogger {
    directory: PathBuf,
    fallback: FallbackSink,
}

impl CategoryLogger {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            fallback: FallbackSink::Stderr,
        }
    }

    /// Logger writing to the `logs_directory` setting
    pub fn from_settings(settings: &Settings) -> Self {
        let directory = settings
            .get_str("logs_directory")
            .map(PathBuf::from)
            .unwrap_or_else(|| settings.document_root().join("app").join("logs"));
        Self::new(directory)
    }

    pub fn with_fallback(mut self, fallback: FallbackSink) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file backing `category`
    pub fn path_for(&self, category: &str) -> PathBuf {
        self.directory.join(format!("{}.log", category))
    }

    /// Append `message` to the category file
    ///
    /// If the file cannot be written the line goes to the fallback sink,
    /// preceded by a notice naming the file. An error is returned only
    /// when the fallback fails as well.
    pub fn write(&self, message: &str, category: &str) -> Result<(), LoggerError> {
        let path = self.path_for(category);

        let Err(primary) = append_line(&path, message) else {
            return Ok(());
        };

        warn!(path = %path.display(), error = %primary, "Category log unwritable, using fallback");
        let notice = format!(
            "NOTICE: Was unable to write to {}, fell back to {}",
            path.display(),
            self.fallback_label()
        );

        let fallback = match &self.fallback {
            FallbackSink::Stderr => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{}", notice).and_then(|_| writeln!(stderr, "{}", message))
            }
            FallbackSink::File(fallback_path) => append_line(fallback_path, &notice)
                .and_then(|_| append_line(fallback_path, message)),
        };

        fallback.map_err(|_| LoggerError::unwritable(path.display().to_string()))
    }

    /// Append `message` prefixed with the current Eastern time
    pub fn write_dated(&self, message: &str, category: &str) -> Result<(), LoggerError> {
        self.write(&dated_line(&Zoned::now(), message), category)
    }

    fn fallback_label(&self) -> String {
        match &self.fallback {
            FallbackSink::Stderr => "stderr".to_string(),
            FallbackSink::File(path) => path.display().to_string(),
        }
    }
}

/// Format `<timestamp> | <message>` for the given instant
pub fn dated_line(now: &Zoned, message: &str) -> String {
    let tz = TimeZone::get(LOG_TIMEZONE).unwrap_or(TimeZone::UTC);
    let local = now.with_time_zone(tz);
    format!("{} | {}", local.strftime(TIMESTAMP_FORMAT), message)
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}
