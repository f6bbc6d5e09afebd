//! Client configuration resolved from CLI flags and environment variables.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root including the `/api/` segment, always ending in `/`.
    pub api_base: String,
    /// Token sent as `Authorization: Token <token>`.
    pub token: Option<String>,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>, timeouts: Timeouts) -> Self {
        Self {
            api_base: normalize_base_url(base_url),
            token: token.filter(|t| !t.trim().is_empty()),
            timeouts,
        }
    }
}

/// Trim whitespace and guarantee exactly one trailing slash.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    format!("{}/", raw.trim().trim_end_matches('/'))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
