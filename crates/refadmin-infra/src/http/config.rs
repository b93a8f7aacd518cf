use std::time::Duration;

/// Admin backend connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., http://localhost:3000)
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// No timeout unless `REFADMIN_HTTP_TIMEOUT_SECS` is a positive number.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("REFADMIN_API_URL").unwrap_or(defaults.base_url),
            timeout: match std::env::var("REFADMIN_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
            {
                Some(0) | None => defaults.timeout,
                Some(secs) => Some(Duration::from_secs(secs)),
            },
        }
    }
}
