//! The one configured HTTP client shared by every API call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holds the base address, the JSON default header, the timeout discipline,
//! and the process-wide bearer slot. The slot is mutated only by the auth
//! session's `login`/`logout`/`restore`; every request consults it, so an
//! auth change is visible to all subsequent calls without any per-call
//! plumbing.

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::net::error::{ApiError, normalize_server, normalize_transport};

const MALFORMED_BODY_MESSAGE: &str = "malformed response body";

/// Configured HTTP client with a mutable bearer-token slot.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build the client from config: fixed base address, JSON content type,
    /// request and connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestSetup`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::RequestSetup { message: e.to_string() })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
        })
    }

    /// Install `token` so every subsequent request carries
    /// `Authorization: Bearer <token>`.
    pub fn set_bearer(&self, token: &str) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Remove the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_bearer(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current bearer token, if one is installed.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// `GET` a JSON resource under the base address.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport or server
    /// failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    /// `POST` a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] for any transport or server
    /// failure.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let request = match self.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| normalize_transport(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| normalize_transport(&e))?;

        if !status.is_success() {
            return Err(normalize_server(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|_| ApiError::Server {
            message: MALFORMED_BODY_MESSAGE.to_string(),
            status: status.as_u16(),
        })
    }
}
