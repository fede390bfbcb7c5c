//! Session state and cookie policy

use axum_extra::extract::cookie::{Cookie, SameSite};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::config::settings::DEFAULT_SESSION_NAME;

/// Length of generated session ids
pub const SESSION_ID_LENGTH: usize = 48;

/// Lifetime of the session cookie and of stored session data, in seconds
pub const SESSION_LIFETIME_SECS: u64 = 86400;

/// Session key holding the authenticated account name
pub const USERNAME_KEY: &str = "username";

/// Data attached to one browser session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    id: String,
    #[serde(default)]
    data: Map<String, Value>,
}

impl SessionState {
    /// Fresh, empty session with a random id
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            data: Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.data.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Drop every stored value; the id is kept
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logged-in account name; an empty string counts as absent
    pub fn username(&self) -> Option<&str> {
        self.data
            .get(USERNAME_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Replace the id, returning the old one
    pub fn rotate_id(&mut self) -> String {
        std::mem::replace(&mut self.id, generate_id())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `candidate` has the shape of an id this crate generated
pub fn is_valid_id(candidate: &str) -> bool {
    candidate.len() == SESSION_ID_LENGTH && candidate.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Attributes of the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    name: String,
    domain: Option<String>,
}

impl CookiePolicy {
    pub fn new<S: Into<String>>(name: S, domain: Option<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.filter(|d| !d.is_empty()),
        }
    }

    /// Policy from the `session_name` and `domain` settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings
                .get_str("session_name")
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_SESSION_NAME),
            settings.get_str("domain").map(str::to_string),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Cookie carrying `session_id`
    pub fn cookie(&self, session_id: &str) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), session_id.to_string()))
            .path("/")
            .max_age(time::Duration::seconds(SESSION_LIFETIME_SECS as i64))
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Strict);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.build()
    }

    /// Expired cookie that makes the browser forget the session
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.cookie("");
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderOptions;

    #[test]
    fn test_new_session_id_shape() {
        let session = SessionState::new();
        assert_eq!(session.id().len(), SESSION_ID_LENGTH);
        assert!(is_valid_id(session.id()));
        assert!(session.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(SessionState::new().id(), SessionState::new().id());
    }

    #[test]
    fn test_is_valid_id_rejects_foreign_values() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("short"));
        assert!(!is_valid_id(&"-".repeat(SESSION_ID_LENGTH)));
    }

    #[test]
    fn test_username_ignores_empty_and_non_string() {
        let mut session = SessionState::new();
        assert_eq!(session.username(), None);

        session.insert(USERNAME_KEY, "");
        assert_eq!(session.username(), None);

        session.insert(USERNAME_KEY, 42);
        assert_eq!(session.username(), None);

        session.insert(USERNAME_KEY, "nate");
        assert_eq!(session.username(), Some("nate"));
    }

    #[test]
    fn test_rotate_id_keeps_data() {
        let mut session = SessionState::new();
        session.insert("theme", "dark");

        let old = session.rotate_id();
        assert_ne!(old, session.id());
        assert_eq!(session.get("theme"), Some(&Value::from("dark")));
    }

    #[test]
    fn test_cookie_attributes() {
        let policy = CookiePolicy::new("neufw_session", Some("example.com".to_string()));
        let cookie = policy.cookie("abc");

        assert_eq!(cookie.name(), "neufw_session");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("example.com"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
    }

    #[test]
    fn test_removal_cookie_expires() {
        let policy = CookiePolicy::new("neufw_session", None);
        let cookie = policy.removal();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn test_policy_from_settings() {
        let mut settings = Settings::with_defaults(&LoaderOptions::default());
        assert_eq!(CookiePolicy::from_settings(&settings).name(), DEFAULT_SESSION_NAME);

        settings.set("session_name", "app_sid");
        settings.set("domain", "example.org");
        let policy = CookiePolicy::from_settings(&settings);
        assert_eq!(policy.name(), "app_sid");
        assert_eq!(policy.domain(), Some("example.org"));
    }
}
