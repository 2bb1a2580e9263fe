//! Normalized error shapes for the client core.
//!
//! DESIGN
//! ======
//! Every HTTP failure collapses into one of three kinds regardless of the
//! underlying transport cause, so call sites branch on what happened to the
//! request rather than on `reqwest` internals. Storage and validation have
//! their own types: storage degrades silently during restore, and validation
//! never reaches the network at all.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

/// Fallback when the server answers non-2xx without a usable `message`.
pub const SERVER_ERROR_FALLBACK: &str = "request failed";
/// Fixed message for requests that were sent but got no response.
pub const NO_RESPONSE_MESSAGE: &str = "no response received from server";
/// Fixed message for requests that could not be constructed.
pub const REQUEST_SETUP_MESSAGE: &str = "failed to set up the request";

/// A failed API call, normalized from any transport or server outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `message` is taken from
    /// the response body's `message` field when the body is JSON, else the
    /// fixed fallback.
    #[error("server error ({status}): {message}")]
    Server { message: String, status: u16 },

    /// The request was sent but no response arrived (connect failure,
    /// timeout, dropped connection).
    #[error("{message}")]
    NoResponse { message: String },

    /// The request could not be constructed (bad URL, body serialization).
    #[error("{message}")]
    RequestSetup { message: String },
}

impl ApiError {
    /// Best available human-readable text for a user-facing alert:
    /// server-provided message when present, else the per-kind fallback.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Server { message, .. } => message,
            Self::NoResponse { message } | Self::RequestSetup { message } => message,
        }
    }

    /// Status code, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::NoResponse { .. } | Self::RequestSetup { .. } => None,
        }
    }
}

/// A failed read or write against the device-local session backend.
///
/// Restoration swallows these (a missing or unreadable session means logged
/// out); `save`/`clear` surface them after the in-memory state is settled.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend could not read or write an entry.
    #[error("session storage {op} failed for `{key}`: {source}")]
    Io {
        op: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The user record could not be serialized for storage.
    #[error("session record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A client-side form check that failed before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields are empty.
    #[error("all fields are required")]
    MissingFields,

    /// The email does not look like `local@domain.tld`.
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// The password is shorter than the minimum length.
    #[error("the password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    /// Age, weight, or height is missing or not positive.
    #[error("age, weight and height are required")]
    MissingMeasurements,

    /// The dietary restriction selection is empty.
    #[error("select at least one dietary restriction, or \"none\"")]
    EmptyRestrictions,
}

/// Map a `reqwest` failure that prevented a response into the taxonomy.
///
/// Builder failures mean the request never existed (`RequestSetup`);
/// everything else here fired on the wire and heard nothing back
/// (`NoResponse`). Non-2xx responses never reach this path.
pub(crate) fn normalize_transport(error: &reqwest::Error) -> ApiError {
    if error.is_builder() {
        ApiError::RequestSetup { message: REQUEST_SETUP_MESSAGE.to_string() }
    } else {
        ApiError::NoResponse { message: NO_RESPONSE_MESSAGE.to_string() }
    }
}

/// Build the `Server` kind from a non-2xx status and its raw body.
///
/// The body is probed as JSON for a string `message` field; anything else
/// falls back to the fixed string so callers always have display text.
pub(crate) fn normalize_server(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(ToOwned::to_owned))
        .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
    ApiError::Server { message, status }
}
