//! neufw library
//!
//! Settings engine, session authentication and the supporting pieces
//! (caches, database pools, category logs, error pages and HTTP helpers)
//! for neufw web applications.

use shadow_rs::shadow;
shadow!(build);

pub mod cache;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod session;
pub mod state;
pub mod utils;

pub use state::AppContext;
