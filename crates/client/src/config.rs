//! Client configuration.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const MAX_TIMEOUT: Duration = Duration::from_secs(120);

pub const ENV_API_URL: &str = "MALLHUB_API_URL";
pub const ENV_TOKEN: &str = "MALLHUB_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "MALLHUB_TIMEOUT_SECS";

/// Settings for connecting to the dashboard API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including any path prefix (e.g. "http://localhost:3000/api").
    pub base_url: String,

    /// Bearer token used to authorize requests.
    pub token: Option<String>,

    /// Per-request timeout; expiry surfaces as a network error.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `MALLHUB_API_URL`, `MALLHUB_TOKEN` and `MALLHUB_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or unparsable values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = present(ENV_API_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let token = present(ENV_TOKEN);

        let timeout = match present(ENV_TIMEOUT_SECS) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs).clamp(Duration::from_secs(1), MAX_TIMEOUT),
                Err(_) => {
                    tracing::warn!(value = %raw, "{ENV_TIMEOUT_SECS} is not a number; using default");
                    DEFAULT_TIMEOUT
                }
            },
        };

        Self {
            base_url,
            token,
            timeout,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
