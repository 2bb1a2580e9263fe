//! The persistent session store: one durable (token, user) pair.
//!
//! DESIGN
//! ======
//! Two fixed keys, written and read only here. `load` is deliberately
//! forgiving: a pair that was never written, lost one half, or fails to
//! parse all come back as absent, and the caller proceeds as logged out.
//! Nothing in this module decides auth state; it only remembers it.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::Arc;

use crate::net::error::StorageError;
use crate::net::types::User;
use crate::session::backend::SessionBackend;

/// Storage key for the opaque bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the serialized user record.
pub const USER_KEY: &str = "user_record";

/// Durable storage for the session pair, over a pluggable backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Durably write both halves of the session pair.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the user record cannot be serialized or
    /// the backend rejects a write.
    pub async fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let record = serde_json::to_string(user)?;
        self.backend.put(TOKEN_KEY, token).await?;
        self.backend.put(USER_KEY, &record).await
    }

    /// Read the previously saved pair, or `None` if there is no usable
    /// session.
    ///
    /// A missing half or an unparsable user record is treated as absent,
    /// not an error; backend read failures degrade the same way with a
    /// warning.
    pub async fn load(&self) -> Option<(String, User)> {
        let token = self.read_entry(TOKEN_KEY).await?;
        let record = self.read_entry(USER_KEY).await?;

        match serde_json::from_str::<User>(&record) {
            Ok(user) => Some((token, user)),
            Err(e) => {
                tracing::warn!(error = %e, "stored user record unparsable; treating session as absent");
                None
            }
        }
    }

    /// Remove both keys. After this, [`SessionStore::load`] returns `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects a removal.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(TOKEN_KEY).await?;
        self.backend.remove(USER_KEY).await
    }

    async fn read_entry(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, key, "session storage read failed; treating entry as absent");
                None
            }
        }
    }
}
