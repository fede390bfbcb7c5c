//! Configuration sources
//!
//! Each source yields raw `(key, value)` string pairs. Normalization and
//! coercion happen later, when the pairs are applied to a store.

pub mod dotenv;
pub mod env;
pub mod json;

/// Raw key/value pairs as read from a source
pub type RawEntries = Vec<(String, String)>;
