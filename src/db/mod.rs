//! Database connection pool module.
//!
//! Async PostgreSQL pools (diesel_async + bb8), opened by name and kept in
//! a [`DatabaseRegistry`] for the lifetime of the application context.

mod pool;
mod registry;

pub use pool::{AsyncDbPool, establish_async_connection_pool};
pub use registry::DatabaseRegistry;
