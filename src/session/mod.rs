//! Session-based authentication
//!
//! A [`SessionState`] is loaded from a [`SessionStore`] using the id in the
//! session cookie. [`SessionService`] checks credentials against a
//! [`CredentialStore`] (normally the `users` table) and records the
//! authenticated username in the session.

pub mod credentials;
pub mod service;
pub mod state;
pub mod store;

pub use credentials::CredentialStore;
pub use service::{LOGIN_PATH, SessionService, Validation};
pub use state::{CookiePolicy, SESSION_ID_LENGTH, SESSION_LIFETIME_SECS, SessionState};
pub use store::{CacheSessionStore, SessionStore};
