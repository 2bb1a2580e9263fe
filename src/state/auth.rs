//! Auth-session state for the current app user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The one owner of login state. Screens call [`AuthSession::login`] and
//! [`AuthSession::logout`]; app start calls [`AuthSession::restore`] once.
//! Each operation updates the in-memory pair, the persistent store, and the
//! HTTP client's bearer slot, then notifies subscribers (the navigation
//! guard among them) with an immutable snapshot.
//!
//! STATE MACHINE
//! =============
//! Uninitialized → Loading → {Authenticated, Unauthenticated}. The
//! authenticated and unauthenticated states swap only through `login` /
//! `logout`, and every transition passes through a visible loading edge so
//! observers can suspend decisions mid-flight. There is no terminal state;
//! the container lives for the process lifetime.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};

use crate::net::client::ApiClient;
use crate::net::error::StorageError;
use crate::net::types::User;
use crate::session::store::SessionStore;

type Listener = Box<dyn Fn(&AuthSnapshot) + Send + Sync>;

/// Immutable copy of auth state, delivered to subscribers and the guard.
///
/// `token` and `user` are both present or both absent; the container stores
/// them as one pair, so a partial session is unrepresentable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Opaque bearer token, when authenticated.
    pub token: Option<String>,
    /// The logged-in user record, when authenticated.
    pub user: Option<User>,
    /// True while an operation is mid-flight; redirect decisions pause.
    pub loading: bool,
}

impl AuthSnapshot {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

struct Inner {
    session: Option<(String, User)>,
    loading: bool,
}

/// The auth state container.
pub struct AuthSession {
    client: Arc<ApiClient>,
    store: SessionStore,
    inner: Mutex<Inner>,
    listeners: Mutex<Vec<Listener>>,
}

impl AuthSession {
    /// Create the container in its pre-restore state: unauthenticated and
    /// `loading`, so the guard stays inert until [`AuthSession::restore`]
    /// has run.
    #[must_use]
    pub fn new(client: Arc<ApiClient>, store: SessionStore) -> Self {
        Self {
            client,
            store,
            inner: Mutex::new(Inner { session: None, loading: true }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a listener fired after every state change with a fresh
    /// snapshot. Listeners must tolerate repeated delivery of an unchanged
    /// state.
    pub fn subscribe(&self, listener: impl Fn(&AuthSnapshot) + Send + Sync + 'static) {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push(Box::new(listener));
    }

    /// Current state as an immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        AuthSnapshot {
            token: inner.session.as_ref().map(|(token, _)| token.clone()),
            user: inner.session.as_ref().map(|(_, user)| user.clone()),
            loading: inner.loading,
        }
    }

    /// Restore the persisted session, once at process start.
    ///
    /// Never fails: a missing, partial, or unreadable stored session leaves
    /// the container unauthenticated, and `loading` always clears at the
    /// end regardless of outcome.
    pub async fn restore(&self) {
        self.set_loading(true);
        if let Some((token, user)) = self.store.load().await {
            self.client.set_bearer(&token);
            self.set_session(Some((token, user)));
        }
        self.set_loading(false);
    }

    /// Open a session from a token/user pair the login screen obtained via
    /// [`crate::net::api::login`].
    ///
    /// In-memory state and the bearer slot update first; persistence is
    /// best-effort after that. Every request from here until
    /// [`AuthSession::logout`] carries `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the pair could not be persisted. The
    /// session is still open in memory; it just will not survive a process
    /// restart.
    pub async fn login(&self, token: String, user: User) -> Result<(), StorageError> {
        self.set_loading(true);
        self.client.set_bearer(&token);
        self.set_session(Some((token.clone(), user.clone())));
        let persisted = self.store.save(&token, &user).await;
        self.set_loading(false);
        persisted
    }

    /// Close the session: clear memory, storage, and the bearer slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the stored pair could not be removed.
    /// The in-memory session is closed either way.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.set_loading(true);
        self.client.clear_bearer();
        self.set_session(None);
        let cleared = self.store.clear().await;
        self.set_loading(false);
        cleared
    }

    fn set_loading(&self, loading: bool) {
        {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.loading = loading;
        }
        self.notify();
    }

    fn set_session(&self, session: Option<(String, User)>) {
        {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.session = session;
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(&snapshot);
        }
    }
}
