//! Login, validation and logout against a credential store

use std::sync::Arc;

use axum_extra::extract::cookie::Cookie;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::AppResult;
use crate::models::UserRecord;
use crate::session::credentials::CredentialStore;
use crate::session::state::{CookiePolicy, SessionState, USERNAME_KEY, is_valid_id};
use crate::session::store::SessionStore;
use crate::utils::password::verify_password;

/// Path of the login page, relative to the site root
pub const LOGIN_PATH: &str = "/auth/login";

/// Outcome of [`SessionService::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The session belongs to an enabled account
    Authenticated(UserRecord),
    /// No usable login; send the client to this url
    Redirect(String),
}

impl Validation {
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Validation::Authenticated(user) => Some(user),
            Validation::Redirect(_) => None,
        }
    }
}

/// Session/auth flow shared by every request
#[derive(Clone)]
pub struct SessionService {
    credentials: Arc<dyn CredentialStore>,
    store: Arc<dyn SessionStore>,
    policy: CookiePolicy,
    login_url: String,
}

impl SessionService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        store: Arc<dyn SessionStore>,
        settings: &Settings,
    ) -> Self {
        Self {
            credentials,
            store,
            policy: CookiePolicy::from_settings(settings),
            login_url: login_url(settings),
        }
    }

    pub fn policy(&self) -> &CookiePolicy {
        &self.policy
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Resume the session named by the cookie, or begin a new one
    ///
    /// Ids that were not generated here, or that have no stored state,
    /// are never adopted.
    pub async fn start(&self, cookie_value: Option<&str>) -> AppResult<SessionState> {
        if let Some(id) = cookie_value.filter(|id| is_valid_id(id)) {
            if let Some(session) = self.store.load(id).await? {
                return Ok(session);
            }
            debug!("Session cookie without stored state, starting fresh");
        }
        Ok(SessionState::new())
    }

    /// Cookie that keeps `session` alive in the browser
    pub fn cookie(&self, session: &SessionState) -> Cookie<'static> {
        self.policy.cookie(session.id())
    }

    /// Check a username/password pair and bind the account to `session`
    ///
    /// Unknown, disabled or mismatching accounts yield `Ok(false)` and
    /// leave the session untouched.
    pub async fn login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> AppResult<bool> {
        let Some(hash) = self.credentials.password_hash(username).await? else {
            debug!(username, "Login for unknown or disabled account");
            return Ok(false);
        };

        if !verify_password(password, &hash) {
            debug!(username, "Login with wrong password");
            return Ok(false);
        }

        session.insert(USERNAME_KEY, username);
        self.store.save(session).await?;
        info!(username, "User logged in");
        Ok(true)
    }

    /// Resolve the account behind `session`
    pub async fn validate(&self, session: &SessionState) -> AppResult<Validation> {
        let Some(username) = session.username() else {
            return Ok(Validation::Redirect(self.login_url.clone()));
        };

        match self.credentials.enabled_user(username).await? {
            Some(user) => Ok(Validation::Authenticated(user)),
            None => {
                debug!(username, "Session account no longer enabled");
                Ok(Validation::Redirect(self.login_url.clone()))
            }
        }
    }

    /// End `session` and return the cookie that clears it client-side
    ///
    /// The stored state is destroyed, all values are dropped and the id is
    /// rotated so the old id can never be resumed.
    pub async fn logout(&self, session: &mut SessionState) -> AppResult<Cookie<'static>> {
        self.store.destroy(session.id()).await?;
        if let Some(username) = session.username() {
            info!(username, "User logged out");
        }
        session.clear();
        session.rotate_id();
        Ok(self.policy.removal())
    }
}

/// `<protocol>://<domain>/auth/login`, or the bare path without a domain
pub fn login_url(settings: &Settings) -> String {
    match settings.get_str("domain").filter(|d| !d.is_empty()) {
        Some(domain) => {
            let protocol = settings
                .get_str("protocol")
                .filter(|p| !p.is_empty())
                .unwrap_or("https");
            format!("{}://{}{}", protocol, domain, LOGIN_PATH)
        }
        None => LOGIN_PATH.to_string(),
    }
}
