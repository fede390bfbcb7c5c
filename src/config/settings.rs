//! The settings store
//!
//! A [`Settings`] value is built once per invocation by
//! [`Settings::initialize`] and then shared read-only (usually behind an
//! `Arc`) with everything that needs configuration.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::coerce::coerce;
use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::keys::{KEY_SEPARATOR, insert_nested, normalize_key};
use crate::config::loader::ConfigLoader;
use crate::config::options::LoaderOptions;
use crate::config::sources::RawEntries;
use crate::config::validation::missing_keys;
use crate::config::value::{SettingMap, SettingValue};

/// Name of the session cookie unless configured otherwise
pub const DEFAULT_SESSION_NAME: &str = "neufw_session";

/// Typed key/value settings store
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    values: SettingMap,
    multidimensional: bool,
    document_root: PathBuf,
}

impl Settings {
    /// Build a store holding only the framework defaults
    pub fn with_defaults(options: &LoaderOptions) -> Self {
        let app = options.app_directory();
        let dir = |path: PathBuf| SettingValue::String(format!("{}/", path.display()));

        let mut values = SettingMap::new();
        values.insert(
            Environment::SETTING_KEY.to_string(),
            SettingValue::from(Environment::Development.as_str()),
        );
        values.insert("protocol".to_string(), SettingValue::from("https"));
        values.insert("logs_directory".to_string(), dir(app.join("logs")));
        values.insert("template_directory".to_string(), dir(app.join("templates")));
        values.insert(
            "template_cache_directory".to_string(),
            dir(app.join("cache").join("templates")),
        );
        values.insert(
            "session_name".to_string(),
            SettingValue::from(DEFAULT_SESSION_NAME),
        );

        Self {
            values,
            multidimensional: options.multidimensional,
            document_root: options.document_root.clone(),
        }
    }

    /// Reset to defaults and load one configuration source
    ///
    /// `mechanism` is one of `dotenv`, `json` or `env` (case-insensitive).
    /// An unknown mechanism is not an error: the store keeps only the
    /// defaults and a warning is logged.
    pub fn initialize(mechanism: &str, options: &LoaderOptions) -> Result<Self, ConfigError> {
        ConfigLoader::new(mechanism, options.clone()).load()
    }

    /// Normalize, coerce and store raw source entries
    pub(crate) fn apply(&mut self, entries: RawEntries, options: &LoaderOptions, nested: bool) {
        for (raw_key, raw_value) in entries {
            let key = normalize_key(&raw_key, options.lowercase_keys);
            let value = coerce(&raw_value, options.literal_types);
            if nested && key.contains(KEY_SEPARATOR) {
                insert_nested(&mut self.values, &key, value);
            } else {
                self.values.insert(key, value);
            }
        }
    }

    /// Look up a key, descending into sections for dotted keys
    ///
    /// An exact key match always wins over a nested path. A missing
    /// segment or a scalar in the middle of the path yields `None`.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.try_get(key).ok().flatten()
    }

    /// Like [`get`](Self::get), but walking into a scalar is an error
    pub fn try_get(&self, key: &str) -> Result<Option<&SettingValue>, ConfigError> {
        if let Some(value) = self.values.get(key) {
            return Ok(Some(value));
        }

        let mut segments = key.split(KEY_SEPARATOR);
        let Some(first) = segments.next() else {
            return Ok(None);
        };
        let Some(mut current) = self.values.get(first) else {
            return Ok(None);
        };

        let mut previous = first;
        for segment in segments {
            let SettingValue::Map(map) = current else {
                return Err(ConfigError::Lookup {
                    key: key.to_string(),
                    segment: previous.to_string(),
                });
            };
            match map.get(segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
            previous = segment;
        }

        Ok(Some(current))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(SettingValue::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingValue::as_f64)
    }

    /// Collect everything under `key` into one map
    ///
    /// Both a nested section and flat `key.*` entries contribute; flat
    /// entries are merged over the nested ones.
    pub fn section_map(&self, key: &str) -> SettingMap {
        let mut section = match self.get(key) {
            Some(SettingValue::Map(map)) => map.clone(),
            _ => SettingMap::new(),
        };

        let prefix = format!("{}{}", key, KEY_SEPARATOR);
        for (flat_key, value) in &self.values {
            if let Some(rest) = flat_key.strip_prefix(&prefix)
                && !rest.is_empty()
            {
                insert_nested(&mut section, rest, value.clone());
            }
        }

        section
    }

    /// Deserialize the section under `key` into a typed struct
    ///
    /// An absent section deserializes from an empty map, so serde defaults
    /// apply. Scalars are matched to the field type, so `1` fills an
    /// integer field and `2024` a string field.
    pub fn section<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let section = SettingValue::Map(self.section_map(key));
        T::deserialize(section).map_err(|e| ConfigError::Deserialize {
            section: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Snapshot of every stored value
    pub fn all(&self) -> SettingMap {
        self.values.clone()
    }

    /// Store a value
    ///
    /// Dotted keys are nested only when the store was loaded with
    /// `multidimensional` enabled; otherwise the key is stored flat.
    pub fn set<V: Into<SettingValue>>(&mut self, key: &str, value: V) {
        let value = value.into();
        if self.multidimensional && key.contains(KEY_SEPARATOR) {
            insert_nested(&mut self.values, key, value);
        } else {
            self.values.insert(key.to_string(), value);
        }
    }

    /// Remove a top-level key; absent keys are ignored
    pub fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }

    /// True when every required key is present at the top level
    pub fn verify_required(&self, required: &[String]) -> bool {
        missing_keys(required, self.values.keys().map(String::as_str)).is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn multidimensional(&self) -> bool {
        self.multidimensional
    }

    /// Base path the default directories were derived from
    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    /// Parsed `environment` setting, development when unset or unknown
    pub fn environment(&self) -> Environment {
        Environment::from_setting(self.get_str(Environment::SETTING_KEY))
    }
}
