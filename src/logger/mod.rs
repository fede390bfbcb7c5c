//! Logger Module
//!
//! Two independent pieces:
//! - a `tracing-subscriber` setup with console output (color control) and
//!   file output in Full, Compact or JSON format, falling back to stderr
//!   when the file becomes unwritable
//! - [`CategoryLogger`], which appends timestamped lines to
//!   `<logs_directory>/<category>.log`

pub mod category;
pub mod config;
pub mod error;
pub(crate) mod writer;

#[cfg(test)]
mod tests;

// Re-export main types
pub use category::{CategoryLogger, FallbackSink};
pub use config::*;
pub use error::LoggerError;
pub use writer::{ErrorCallback, RecoveryStrategy};

use std::io::IsTerminal;

use tracing::Dispatch;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt};
use writer::LogFileWriter;

/// Initialize the logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    let dispatch = build_dispatch(&config)?;
    tracing::dispatcher::set_global_default(dispatch)?;
    Ok(())
}

/// Build the subscriber described by `config` without installing it
pub fn build_dispatch(config: &LoggerConfig) -> anyhow::Result<Dispatch> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match (config.console.enabled, config.file.enabled) {
        (true, true) => build_both(config, filter),
        (true, false) => Ok(build_console_only(&config.console, filter)),
        (false, true) => build_file_only(&config.file, filter),
        (false, false) => anyhow::bail!("At least one output (console or file) must be enabled"),
    }
}

fn build_console_only(config: &ConsoleConfig, filter: EnvFilter) -> Dispatch {
    let use_ansi = config.colored && std::io::stderr().is_terminal();

    Dispatch::new(
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(use_ansi)),
    )
}

fn build_file_only(config: &FileConfig, filter: EnvFilter) -> anyhow::Result<Dispatch> {
    let writer = LogFileWriter::new(config)?;

    let dispatch = match config.format {
        LogFormat::Full => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(writer),
            ),
        ),
        LogFormat::Compact => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer),
            ),
        ),
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).json().with_writer(writer)),
        ),
    };

    Ok(dispatch)
}

fn build_both(config: &LoggerConfig, filter: EnvFilter) -> anyhow::Result<Dispatch> {
    let use_ansi = config.console.colored && std::io::stderr().is_terminal();
    let writer = LogFileWriter::new(&config.file)?;

    // File layer goes first so console ANSI settings never leak into the file
    let dispatch = match config.file.format {
        LogFormat::Full => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(writer),
                )
                .with(console_layer(use_ansi)),
        ),
        LogFormat::Compact => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .compact()
                        .with_writer(writer),
                )
                .with(console_layer(use_ansi)),
        ),
        LogFormat::Json => Dispatch::new(
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .with(console_layer(use_ansi)),
        ),
    };

    Ok(dispatch)
}

/// Console layer for whichever subscriber stack it is added to
fn console_layer<S>(use_ansi: bool) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
}
