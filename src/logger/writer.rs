//! File writer for the tracing subscriber

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;

/// Error recovery strategy for handling write failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Fallback to console output when file write fails
    FallbackToConsole,
    /// Silently drop the log message
    SilentDrop,
}

/// Callback type for error notifications
pub type ErrorCallback = Arc<dyn Fn(&io::Error) + Send + Sync>;

/// Append-only log file writer
pub struct LogFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
    recovery_strategy: RecoveryStrategy,
    error_callback: Option<ErrorCallback>,
}

struct WriterState {
    file: BufWriter<File>,
    /// Flag indicating if we're in fallback mode (writing to console)
    fallback_mode: bool,
}

impl LogFileWriter {
    pub fn new(config: &FileConfig) -> anyhow::Result<Self> {
        Self::with_recovery(config, RecoveryStrategy::FallbackToConsole, None)
    }

    /// Create a new LogFileWriter with a specific recovery strategy
    pub fn with_recovery(
        config: &FileConfig,
        recovery_strategy: RecoveryStrategy,
        error_callback: Option<ErrorCallback>,
    ) -> anyhow::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                fallback_mode: false,
            })),
            path: config.path.clone(),
            recovery_strategy,
            error_callback,
        })
    }

    /// Check if the writer is currently in fallback mode
    pub fn is_in_fallback_mode(&self) -> bool {
        self.state.lock().map(|s| s.fallback_mode).unwrap_or(false)
    }

    /// Attempt to recover from fallback mode by reopening the file
    pub fn try_recover(&self) -> bool {
        if let Ok(mut state) = self.state.lock()
            && state.fallback_mode
            && let Ok(file) = open_log_file(&self.path, true)
        {
            state.file = file;
            state.fallback_mode = false;
            return true;
        }
        false
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriterGuard {
            state: self.state.clone(),
            recovery_strategy: self.recovery_strategy,
            error_callback: self.error_callback.clone(),
        }
    }
}

/// Guard for file writer access
pub struct LogWriterGuard {
    state: Arc<Mutex<WriterState>>,
    recovery_strategy: RecoveryStrategy,
    error_callback: Option<ErrorCallback>,
}

impl Write for LogWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        match state.file.write(buf) {
            Ok(written) => Ok(written),
            Err(e) => self.handle_write_error(&mut state, buf, e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }

        state.file.flush()
    }
}

impl LogWriterGuard {
    fn handle_write_error(
        &self,
        state: &mut WriterState,
        buf: &[u8],
        error: io::Error,
    ) -> io::Result<usize> {
        if let Some(ref callback) = self.error_callback {
            callback(&error);
        }

        match self.recovery_strategy {
            RecoveryStrategy::FallbackToConsole => {
                state.fallback_mode = true;
                eprintln!("[Logger] File write failed, falling back to stderr: {}", error);
                io::stderr().write(buf)
            }
            // report success so the subscriber keeps running
            RecoveryStrategy::SilentDrop => Ok(buf.len()),
        }
    }
}

impl Drop for LogWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

pub(crate) fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}
