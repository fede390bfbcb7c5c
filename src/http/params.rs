//! Query string and form accessors

use std::collections::HashMap;

/// Value of `key` unless it is absent or empty, else `default`
///
/// Works on `Query<HashMap<String, String>>` and `Form<HashMap<String, String>>`
/// payloads alike.
pub fn check_value<'a>(
    params: &'a HashMap<String, String>,
    key: &str,
    default: Option<&'a str>,
) -> Option<&'a str> {
    match params.get(key) {
        Some(value) if !value.is_empty() => Some(value.as_str()),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> HashMap<String, String> {
        HashMap::from([
            ("page".to_string(), "home".to_string()),
            ("section".to_string(), String::new()),
        ])
    }

    #[test]
    fn test_present_value() {
        assert_eq!(check_value(&params(), "page", Some("index")), Some("home"));
    }

    #[test]
    fn test_empty_value_uses_default() {
        assert_eq!(check_value(&params(), "section", Some("main")), Some("main"));
        assert_eq!(check_value(&params(), "section", None), None);
    }

    #[test]
    fn test_missing_value_uses_default() {
        assert_eq!(check_value(&params(), "sort", Some("asc")), Some("asc"));
        assert_eq!(check_value(&params(), "sort", None), None);
    }
}
