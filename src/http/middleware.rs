//! Session and error-page middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::error::{AppError, Severity};
use crate::http::error::FailureDetail;
use crate::http::response::redirect;
use crate::models::UserRecord;
use crate::session::Validation;
use crate::state::AppContext;

/// Authenticated account, available to handlers as `Extension<CurrentUser>`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// Session authentication middleware
///
/// Resumes the session named by the session cookie and validates it.
/// Requests without an enabled account are redirected (302) to the login
/// page; otherwise the [`CurrentUser`] and the
/// [`SessionState`](crate::session::SessionState) are added to the request
/// extensions.
///
/// # Example
/// ```ignore
/// Router::new()
///     .route("/dashboard", get(handler))
///     .layer(middleware::from_fn_with_state(context.clone(), require_session))
/// ```
pub async fn require_session(
    State(context): State<AppContext>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let sessions = &context.sessions;
    let cookie_value = jar.get(sessions.policy().name()).map(|c| c.value().to_string());
    let session = sessions.start(cookie_value.as_deref()).await?;

    match sessions.validate(&session).await? {
        Validation::Redirect(url) => Ok(redirect(&url, false)),
        Validation::Authenticated(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            request.extensions_mut().insert(session);
            Ok(next.run(request).await)
        }
    }
}

/// Replace failed responses with the error page
///
/// Any response carrying a [`FailureDetail`] with a 5xx status is
/// recorded in a fresh per-request error report (tracing plus the `error`
/// category log) and rendered as the error page.
pub async fn error_page_middleware(
    State(context): State<AppContext>,
    request: Request,
    next: Next,
) -> Response {
    let location = request.uri().path().to_string();
    let response = next.run(request).await;

    if !response.status().is_server_error() {
        return response;
    }
    let Some(FailureDetail(detail)) = response.extensions().get::<FailureDetail>().cloned() else {
        return response;
    };

    let mut report = context.error_report();
    report.report(Severity::Fatal, &location, &detail);
    report.page().into_response()
}
