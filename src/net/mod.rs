//! Networking modules for the HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the configured HTTP client and bearer slot, `error` the
//! normalized failure taxonomy, `types` the shared wire schema, and `api`
//! the typed endpoint functions.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
