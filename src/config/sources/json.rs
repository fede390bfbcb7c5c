//! JSON file source
//!
//! Only a single flat object is accepted. Scalars are handed on as their
//! JSON text so they go through the same coercion as every other source.

use std::fs;

use serde_json::Value;
use tracing::debug;

use crate::config::error::ConfigError;
use crate::config::options::LoaderOptions;
use crate::config::sources::RawEntries;

/// Default JSON file name
pub const DEFAULT_FILENAME: &str = "config.json";

/// Read `<directory>/<filename>` into raw entries
pub fn read(options: &LoaderOptions) -> Result<RawEntries, ConfigError> {
    let path = options.source_path(DEFAULT_FILENAME);
    let source_name = path.display().to_string();

    let content =
        fs::read_to_string(&path).map_err(|e| ConfigError::unreadable(&source_name, e))?;
    let entries = parse(&source_name, &content)?;

    debug!(path = %source_name, entries = entries.len(), "Read JSON source");
    Ok(entries)
}

/// Parse a flat JSON object into raw entries
pub fn parse(source_name: &str, content: &str) -> Result<RawEntries, ConfigError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ConfigError::malformed(source_name, e))?;

    let Value::Object(object) = document else {
        return Err(ConfigError::malformed(
            source_name,
            "top-level value must be an object",
        ));
    };

    object
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::String(s) => s,
                Value::Array(_) | Value::Object(_) => {
                    return Err(ConfigError::malformed(
                        source_name,
                        format!("key '{}' holds a nested value", key),
                    ));
                }
            };
            Ok((key, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lookup<'a>(entries: &'a RawEntries, key: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_scalars_become_text() {
        let entries = parse(
            "inline",
            r#"{"DOMAIN":"x.com","PORT":8080,"DEBUG":true,"EMPTY":null,"RATIO":0.5}"#,
        )
        .unwrap();

        assert_eq!(lookup(&entries, "DOMAIN"), Some("x.com"));
        assert_eq!(lookup(&entries, "PORT"), Some("8080"));
        assert_eq!(lookup(&entries, "DEBUG"), Some("true"));
        assert_eq!(lookup(&entries, "EMPTY"), Some(""));
        assert_eq!(lookup(&entries, "RATIO"), Some("0.5"));
    }

    #[test]
    fn test_nested_value_is_malformed() {
        let result = parse("inline", r#"{"redis":{"port":6379}}"#);
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));

        let result = parse("inline", r#"{"hosts":["a","b"]}"#);
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_non_object_is_malformed() {
        assert!(matches!(
            parse("inline", "[1,2,3]"),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            parse("inline", "{not json"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_read_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"A":"1"}"#).unwrap();

        let options = LoaderOptions::default().with_directory(dir.path());
        let entries = read(&options).unwrap();
        assert_eq!(entries, vec![("A".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let options = LoaderOptions::default().with_directory(dir.path());
        assert!(matches!(
            read(&options),
            Err(ConfigError::SourceUnreadable { .. })
        ));
    }
}
