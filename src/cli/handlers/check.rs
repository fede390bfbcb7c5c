//! Check command handler
//!
//! Loads the settings exactly as an application would and validates the
//! typed sections that are present.

use std::io::Write;

use tracing::debug;

use super::output_error;
use crate::config::sources::{dotenv, json};
use crate::config::{
    DatabaseConfig, LoaderOptions, Mechanism, MemoryCacheConfig, RedisCacheConfig, Settings,
};
use crate::error::AppResult;
use crate::logger::LoggerConfig;

/// Handler for the check command
pub struct CheckCommandHandler {
    mechanism: Mechanism,
    options: LoaderOptions,
}

impl CheckCommandHandler {
    pub fn new(mechanism: Mechanism, options: LoaderOptions) -> Self {
        Self { mechanism, options }
    }

    /// Validate and report settings loaded from this handler's source
    ///
    /// # Errors
    /// Invalid values in a present `database`, `cache.*` or `logger` section
    pub fn execute<W: Write>(
        &self,
        settings: &Settings,
        show: bool,
        out: &mut W,
    ) -> AppResult<()> {
        validate_sections(settings)?;

        writeln!(
            out,
            "Configuration loaded from {} ({} settings, environment: {})",
            self.source_description(),
            settings.len(),
            settings.environment()
        )
        .map_err(output_error)?;

        if show {
            for (key, value) in settings.all() {
                writeln!(out, "{} = {}", key, value).map_err(output_error)?;
            }
        }

        Ok(())
    }

    fn source_description(&self) -> String {
        match self.mechanism {
            Mechanism::Dotenv => self.options.source_path(dotenv::DEFAULT_FILENAME).display().to_string(),
            Mechanism::Json => self.options.source_path(json::DEFAULT_FILENAME).display().to_string(),
            Mechanism::Env => "CONFIG_* environment variables".to_string(),
        }
    }
}

/// Validate every typed section that has at least one key
fn validate_sections(settings: &Settings) -> AppResult<()> {
    if !settings.section_map("database").is_empty() {
        settings.section::<DatabaseConfig>("database")?.validate()?;
        debug!("database section is valid");
    }
    if !settings.section_map("cache.memory").is_empty() {
        settings
            .section::<MemoryCacheConfig>("cache.memory")?
            .validate()?;
        debug!("cache.memory section is valid");
    }
    if !settings.section_map("cache.redis").is_empty() {
        settings
            .section::<RedisCacheConfig>("cache.redis")?
            .validate()?;
        debug!("cache.redis section is valid");
    }
    if !settings.section_map("logger").is_empty() {
        settings.section::<LoggerConfig>("logger")?.validate()?;
        debug!("logger section is valid");
    }
    Ok(())
}
