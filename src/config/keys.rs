//! Key normalization and nested merging

use crate::config::value::{SettingMap, SettingValue};

/// Separator for nested setting paths
pub const KEY_SEPARATOR: char = '.';

/// Normalize a raw key, lower-casing it unless case is preserved
pub fn normalize_key(raw: &str, lowercase: bool) -> String {
    if lowercase {
        raw.to_lowercase()
    } else {
        raw.to_string()
    }
}

/// Expand `a.b.c` + `v` into `{a: {b: {c: v}}}`
///
/// Returns the top-level segment and the value to store under it. A key
/// without separators comes back unchanged.
pub fn nest(key: &str, value: SettingValue) -> (String, SettingValue) {
    let mut segments = key.split(KEY_SEPARATOR).rev();
    let last = segments.next().unwrap_or_default();

    let mut nested = value;
    let mut head = last.to_string();
    for segment in segments {
        let mut map = SettingMap::new();
        map.insert(head, nested);
        nested = SettingValue::Map(map);
        head = segment.to_string();
    }

    (head, nested)
}

/// Merge `source` into `target` recursively
///
/// Maps merge key by key at every depth. Anything else is replaced by the
/// incoming value.
pub fn deep_merge(target: &mut SettingMap, source: SettingMap) {
    for (key, incoming) in source {
        match (target.get_mut(&key), incoming) {
            (Some(SettingValue::Map(existing)), SettingValue::Map(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, incoming) => {
                target.insert(key, incoming);
            }
        }
    }
}

/// Insert a dotted key into `target`, nesting and merging
pub fn insert_nested(target: &mut SettingMap, key: &str, value: SettingValue) {
    let (head, nested) = nest(key, value);
    let mut single = SettingMap::new();
    single.insert(head, nested);
    deep_merge(target, single);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map(entries: Vec<(&str, SettingValue)>) -> SettingMap {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("DB_HOST", true), "db_host");
        assert_eq!(normalize_key("DB_HOST", false), "DB_HOST");
        assert_eq!(normalize_key("Redis.Port", true), "redis.port");
    }

    #[test]
    fn test_nest_plain_key() {
        let (head, value) = nest("domain", SettingValue::from("x.com"));
        assert_eq!(head, "domain");
        assert_eq!(value, SettingValue::from("x.com"));
    }

    #[test]
    fn test_nest_dotted_key() {
        let (head, value) = nest("a.b.c", SettingValue::Int(1));
        assert_eq!(head, "a");
        let expected = SettingValue::Map(map(vec![(
            "b",
            SettingValue::Map(map(vec![("c", SettingValue::Int(1))])),
        )]));
        assert_eq!(value, expected);
    }

    #[test]
    fn test_merge_preserves_siblings() {
        let mut target = SettingMap::new();
        insert_nested(&mut target, "a.b", SettingValue::Int(1));
        insert_nested(&mut target, "a.c", SettingValue::Int(2));

        let expected = map(vec![(
            "a",
            SettingValue::Map(map(vec![
                ("b", SettingValue::Int(1)),
                ("c", SettingValue::Int(2)),
            ])),
        )]);
        assert_eq!(target, expected);
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut target = SettingMap::new();
        insert_nested(&mut target, "a.b", SettingValue::Int(1));
        insert_nested(&mut target, "a.b", SettingValue::Int(9));
        assert_eq!(
            target["a"].as_map().and_then(|m| m.get("b")),
            Some(&SettingValue::Int(9))
        );
    }

    #[test]
    fn test_merge_map_replaces_scalar() {
        let mut target = map(vec![("a", SettingValue::from("flat"))]);
        insert_nested(&mut target, "a.b", SettingValue::Int(1));
        assert_eq!(
            target["a"],
            SettingValue::Map(map(vec![("b", SettingValue::Int(1))]))
        );
    }

    #[test]
    fn test_merge_scalar_replaces_map() {
        let mut target = SettingMap::new();
        insert_nested(&mut target, "a.b", SettingValue::Int(1));
        insert_nested(&mut target, "a", SettingValue::Bool(true));
        assert_eq!(target["a"], SettingValue::Bool(true));
    }

    proptest! {
        #[test]
        fn property_distinct_leaves_all_survive(
            leaves in proptest::collection::btree_set("[a-z]{1,6}", 1..8)
        ) {
            let mut target = SettingMap::new();
            for (i, leaf) in leaves.iter().enumerate() {
                insert_nested(&mut target, &format!("root.{}", leaf), SettingValue::Int(i as i64));
            }
            let root = target.get("root").and_then(|v| v.as_map()).cloned().unwrap_or_default();
            prop_assert_eq!(root.len(), leaves.len());
        }
    }
}
