//! In-process application state.

pub mod auth;

pub use auth::{AuthSession, AuthSnapshot};
