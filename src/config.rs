//! API configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`crate::net::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base address every endpoint path is appended to, no trailing slash.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Connection-establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `FUELREC_API_BASE_URL`: default `http://127.0.0.1:5000/api`
    /// - `FUELREC_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FUELREC_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// Malformed numeric values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("FUELREC_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            request_timeout_secs: env_parse_u64("FUELREC_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout_secs: env_parse_u64("FUELREC_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
