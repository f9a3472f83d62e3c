use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Upstream API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportsConfig {
    pub base_url: String,
    pub api_key: String,
    /// Timeout for standings/fixtures requests.
    pub request_timeout: Duration,
    /// Timeout for the connectivity check.
    pub status_timeout: Duration,
}

impl Default for SportsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(30),
            status_timeout: Duration::from_secs(10),
        }
    }
}

impl SportsConfig {
    /// Read `SPORTS_API_BASE_URL` and `SPORTS_API_KEY` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup("SPORTS_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }

        match lookup("SPORTS_API_KEY").filter(|v| !v.trim().is_empty()) {
            Some(key) => config.api_key = key,
            None => tracing::warn!("SPORTS_API_KEY not set; upstream requests will be rejected"),
        }

        config
    }
}
