//! Per-invocation error collection
//!
//! Every reported problem is written to a category log. Outside production
//! the messages are also kept, with the document root stripped, so they
//! can be listed on the error page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, warn};

use crate::config::{Environment, Settings};
use crate::logger::CategoryLogger;

/// Shown instead of details in production, or when rendering fails
pub const GENERIC_FAILURE: &str =
    "A technical error occurred and engineers notified, please try again shortly.";

/// Severity of a reported problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notice,
    Warning,
    Deprecated,
    Fatal,
}

impl Severity {
    /// Category log the problem is written to
    pub fn category(&self) -> &'static str {
        match self {
            Severity::Deprecated => "deprecated",
            _ => "error",
        }
    }
}

/// Errors collected during one request or CLI invocation
#[derive(Debug, Clone)]
pub struct ErrorReport {
    environment: Environment,
    document_root: String,
    logger: CategoryLogger,
    messages: Vec<String>,
}

impl ErrorReport {
    pub fn new(settings: &Settings, logger: CategoryLogger) -> Self {
        Self {
            environment: settings.environment(),
            document_root: settings.document_root().display().to_string(),
            logger,
            messages: Vec::new(),
        }
    }

    /// Record a problem at `location` (usually `file:line` or a component name)
    ///
    /// Returns true for fatal problems; the caller must stop and render
    /// the error page.
    pub fn report(&mut self, severity: Severity, location: &str, message: &str) -> bool {
        let formatted = format!("{:<20} | {}", location, message);
        if let Err(e) = self.logger.write_dated(&formatted, severity.category()) {
            error!(error = %e, "Failed to record error in category log");
        }

        match severity {
            Severity::Fatal => error!(location, "{}", message),
            _ => warn!(location, ?severity, "{}", message),
        }

        if !self.environment.is_production() {
            self.messages.push(self.redact(message));
        }

        severity == Severity::Fatal
    }

    /// Record an error that terminated the invocation, with its source chain
    pub fn report_fatal(&mut self, location: &str, err: &(dyn std::error::Error + 'static)) {
        self.report(Severity::Fatal, location, &full_message(err));
    }

    /// Collected messages; `None` in production unless `ignore_environment`
    pub fn errors(&self, ignore_environment: bool) -> Option<&[String]> {
        if !ignore_environment && self.environment.is_production() {
            return None;
        }
        if self.messages.is_empty() {
            None
        } else {
            Some(&self.messages)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Page for the end user
    pub fn page(&self) -> ErrorPage {
        ErrorPage {
            details: self.errors(false).map(<[String]>::to_vec).unwrap_or_default(),
        }
    }

    fn redact(&self, message: &str) -> String {
        if self.document_root.is_empty() {
            return message.to_string();
        }
        message.replace(&self.document_root, "")
    }
}

/// Error message followed by any source messages it does not already contain
pub fn full_message(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Rendered fatal-error page, always served as 500
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    details: Vec<String>,
}

impl ErrorPage {
    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html><head><title>Error</title></head><body>\n",
        );
        html.push_str(&format!("<p>{}</p>\n", GENERIC_FAILURE));
        if !self.details.is_empty() {
            html.push_str("<ul>\n");
            for detail in &self.details {
                html.push_str(&format!("<li>{}</li>\n", escape_html(detail)));
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</body></html>\n");
        html
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Html(self.to_html())).into_response()
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
