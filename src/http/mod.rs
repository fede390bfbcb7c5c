//! HTTP helpers for axum applications
//!
//! - [`ApiResponse`]: the `application/vnd.api+json` envelope
//! - [`redirect`]: 301/302 responses
//! - [`validate_route`]: template lookup for `section/page` requests
//! - [`check_value`]: query/form accessors with defaults
//! - [`require_session`] and [`error_page_middleware`]

pub mod error;
pub mod middleware;
pub mod params;
pub mod response;
pub mod route;


pub use error::FailureDetail;
pub use middleware::{CurrentUser, error_page_middleware, require_session};
pub use params::check_value;
pub use response::{API_CONTENT_TYPE, ApiResponse, redirect};
pub use route::{validate_route, validate_route_in};
