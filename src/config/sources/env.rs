//! Process environment source
//!
//! Picks up every variable named `CONFIG_<KEY>` and strips the prefix.

use tracing::debug;

use crate::config::sources::RawEntries;

/// Prefix marking a variable as configuration
pub const ENV_PREFIX: &str = "CONFIG_";

/// Read `CONFIG_*` variables from the process environment
///
/// Variables whose name or value is not valid UTF-8 are skipped.
pub fn read() -> RawEntries {
    let vars = std::env::vars_os().filter_map(|(key, value)| {
        let key = key.into_string().ok()?;
        let value = value.into_string().ok()?;
        Some((key, value))
    });
    read_from(vars)
}

/// Filter and strip an arbitrary variable listing
pub fn read_from<I>(vars: I) -> RawEntries
where
    I: IntoIterator<Item = (String, String)>,
{
    let entries: RawEntries = vars
        .into_iter()
        .filter_map(|(key, value)| {
            let stripped = key.strip_prefix(ENV_PREFIX)?;
            if stripped.is_empty() {
                return None;
            }
            Some((stripped.to_string(), value))
        })
        .collect();

    debug!(entries = entries.len(), "Read environment source");
    entries
}
