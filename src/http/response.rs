//! JSON API envelope and redirects

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::config::Settings;

/// Content type of every API response
pub const API_CONTENT_TYPE: &str = "application/vnd.api+json; charset=utf-8";

/// Version tag written into the envelope
pub const API_VERSION: &str = "v1";

/// `success` member: a flag or a human readable message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Success {
    Flag(bool),
    Message(String),
}

/// `error` member: `false` or structured details
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Failure {
    Flag(bool),
    Details(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiMeta {
    pub version: &'static str,
    pub node: Option<String>,
    pub domain: Option<String>,
}

/// `{api: {version, node, domain}, error, success, data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub api: ApiMeta,
    pub error: Failure,
    pub success: Success,
    pub data: Value,
}

impl ApiResponse {
    /// Successful response for `node` with the configured `domain`
    pub fn new<N: Into<String>>(settings: &Settings, node: Option<N>, data: Value) -> Self {
        Self {
            api: ApiMeta {
                version: API_VERSION,
                node: node.map(Into::into),
                domain: settings.get_str("domain").map(str::to_string),
            },
            error: Failure::Flag(false),
            success: Success::Flag(true),
            data,
        }
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.success = Success::Message(message.into());
        self
    }

    /// Mark the call as failed with the given details
    pub fn with_error(mut self, details: Value) -> Self {
        self.success = Success::Flag(false);
        self.error = Failure::Details(details);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(API_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(e) => {
                warn!(error = %e, "Failed to encode API response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// 301 or 302 redirect to `url`
///
/// `url` is sent as-is; only use it with internal targets.
pub fn redirect(url: &str, permanent: bool) -> Response {
    let status = if permanent {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::FOUND
    };

    match HeaderValue::from_str(url) {
        Ok(location) => (status, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            warn!(url, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
