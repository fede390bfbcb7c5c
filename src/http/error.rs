//! Error handler for converting AppError to HTTP responses.
//!
//! The response carries a [`FailureDetail`] extension so that
//! [`error_page_middleware`](crate::http::middleware::error_page_middleware)
//! can record the failure and swap in the error page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::{AppError, GENERIC_FAILURE, full_message};

/// Full error text of a failed request, attached to the response
#[derive(Debug, Clone)]
pub struct FailureDetail(pub String);

impl AppError {
    /// Status code mapping
    ///
    /// - Unauthorized → 401 UNAUTHORIZED
    /// - Duplicate → 409 CONFLICT
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - everything else → 500 INTERNAL_SERVER_ERROR
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = full_message(&self);

        let body = match &self {
            AppError::Unauthorized { message } => message.clone(),
            _ => {
                error!(error = %detail, "Request failed");
                GENERIC_FAILURE.to_string()
            }
        };

        let mut response = (status, body).into_response();
        response.extensions_mut().insert(FailureDetail(detail));
        response
    }
}
