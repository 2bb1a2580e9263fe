//! Client core for the FuelRec sports-supplement recommendation app.
//!
//! This crate owns everything below the screens: the persistent session
//! store, the configured HTTP client with its normalized error taxonomy,
//! the auth state container, the navigation guard, and the typed API
//! surface. A UI shell (mobile or otherwise) drives these pieces and renders
//! whatever they report; nothing here draws or lays out anything.
//!
//! ARCHITECTURE
//! ============
//! App start wires the pieces together in one direction:
//!
//! 1. [`config::ApiConfig`] is read from the environment.
//! 2. [`net::ApiClient`] is built once and shared.
//! 3. [`state::AuthSession`] restores the persisted session through
//!    [`session::SessionStore`] and installs the bearer token on the client.
//! 4. [`nav::NavGuard`] subscribes to the session and redirects as auth
//!    state and the current route change.
//!
//! Screens only ever call [`net::api`] functions and the three
//! `AuthSession` operations; they never touch the bearer slot or the store
//! directly.

pub mod config;
pub mod nav;
pub mod net;
pub mod session;
pub mod state;
pub mod validate;

pub use config::ApiConfig;
pub use net::client::ApiClient;
pub use net::error::{ApiError, StorageError, ValidationError};
pub use session::store::SessionStore;
pub use state::auth::{AuthSession, AuthSnapshot};
