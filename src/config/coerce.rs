//! Literal type coercion for raw configuration strings
//!
//! Text sources (env files, the process environment, JSON scalars) only
//! ever hand us strings. When literal types are enabled each value is
//! checked, in order, for null, boolean, integer and float syntax before
//! falling back to a plain string.
//!
//! Boolean detection runs before integer detection, so `"1"` and `"0"`
//! come back as `true` and `false`. Existing configuration files rely on
//! that ordering.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::value::SettingValue;

/// Accepted decimal float syntax (no `inf`, `nan` or hex forms)
static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid float pattern")
});

/// Convert a raw string into a typed setting value
pub fn coerce(raw: &str, literal_types: bool) -> SettingValue {
    if !literal_types {
        return SettingValue::String(raw.to_string());
    }

    if raw.is_empty() || raw == "null" {
        return SettingValue::Null;
    }

    if let Some(b) = parse_bool(raw) {
        return SettingValue::Bool(b);
    }

    if raw.bytes().all(|b| b.is_ascii_digit())
        && let Ok(i) = raw.parse::<i64>()
    {
        return SettingValue::Int(i);
    }

    if let Some(f) = parse_float(raw) {
        return SettingValue::Float(f);
    }

    SettingValue::String(raw.to_string())
}

/// Boolean literal check, case-insensitive and whitespace tolerant
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !FLOAT_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}
