//! Configuration loader
//!
//! Resets a store to the framework defaults and runs exactly one source
//! over it.

use tracing::{info, warn};

use crate::config::error::ConfigError;
use crate::config::options::{LoaderOptions, Mechanism};
use crate::config::settings::Settings;
use crate::config::sources::{dotenv, env, json};
use crate::config::validation::ensure_required;

/// Loads a [`Settings`] store from one mechanism
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    mechanism: String,
    options: LoaderOptions,
}

impl ConfigLoader {
    pub fn new<S: Into<String>>(mechanism: S, options: LoaderOptions) -> Self {
        Self {
            mechanism: mechanism.into(),
            options,
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load configuration from the selected source
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the source file is missing or unreadable
    /// - the source cannot be parsed
    /// - a required key is absent
    /// - the resulting store is empty
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::with_defaults(&self.options);

        match self.mechanism.parse::<Mechanism>() {
            Ok(Mechanism::Dotenv) => {
                // required keys are checked against raw file keys by the source
                let entries = dotenv::read(&self.options)?;
                settings.apply(entries, &self.options, self.options.multidimensional);
            }
            Ok(Mechanism::Json) => {
                let entries = json::read(&self.options)?;
                settings.apply(entries, &self.options, false);
                ensure_required(&self.options.required, settings.keys())?;
            }
            Ok(Mechanism::Env) => {
                let entries = env::read();
                settings.apply(entries, &self.options, false);
                ensure_required(&self.options.required, settings.keys())?;
            }
            Err(reason) => {
                warn!(mechanism = %self.mechanism, "{}; keeping defaults only", reason);
            }
        }

        if settings.is_empty() {
            return Err(ConfigError::Empty);
        }

        info!(
            mechanism = %self.mechanism,
            keys = settings.len(),
            environment = %settings.environment(),
            "Configuration loaded"
        );
        Ok(settings)
    }
}
