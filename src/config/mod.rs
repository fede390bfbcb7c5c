//! Configuration management module for neufw
//!
//! Settings are loaded from exactly one source per invocation:
//! - a dotenv file (`dotenv`)
//! - a flat JSON object (`json`)
//! - `CONFIG_*` process environment variables (`env`)
//!
//! Every source yields raw strings; keys are lower-cased and values are
//! coerced to typed literals unless the [`LoaderOptions`] say otherwise.
//! Framework defaults are always present underneath the loaded values.

pub mod coerce;
mod de;
pub mod environment;
pub mod error;
pub mod keys;
pub mod loader;
pub mod options;
pub mod sections;
pub mod settings;
pub mod sources;
pub mod validation;
pub mod value;

// Re-export public types
pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use options::{LoaderOptions, Mechanism};
pub use sections::{CacheBackend, CacheDetails, DatabaseConfig, MemoryCacheConfig, RedisCacheConfig};
pub use settings::Settings;
pub use value::{SettingMap, SettingValue};
