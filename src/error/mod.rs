mod app_error;
mod report;

pub use app_error::{AppError, AppResult};
pub use report::{ErrorPage, ErrorReport, GENERIC_FAILURE, Severity, full_message};
