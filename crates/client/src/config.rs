use std::time::Duration;

use tofula_core::studio::DEMO_STUDIO_PASSWORD;

/// Backend used when `NEXT_PUBLIC_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Story generation runs the whole AI pipeline and takes minutes, so the
/// default is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// API client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Sent as `X-Studio-Password` on generation and checked by the studio
    /// login page. Demo-mode placeholder, not a credential.
    pub studio_password: String,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `NEXT_PUBLIC_API_URL` | `http://localhost:8000` |
    /// | `API_TIMEOUT_SECS`    | `300`                   |
    /// | `STUDIO_PASSWORD`     | `Tofula@2025`           |
    pub fn from_env() -> Self {
        let api_url = std::env::var("NEXT_PUBLIC_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());

        let timeout_secs = match std::env::var("API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let studio_password =
            std::env::var("STUDIO_PASSWORD").unwrap_or_else(|_| DEMO_STUDIO_PASSWORD.into());

        Self::new(api_url).timeout_secs(timeout_secs).studio_password(studio_password)
    }

    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            studio_password: DEMO_STUDIO_PASSWORD.to_string(),
        }
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn studio_password(mut self, password: impl Into<String>) -> Self {
        self.studio_password = password.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// A positive whole number of seconds; anything else warns and falls back
/// to [`DEFAULT_TIMEOUT_SECS`].
fn parse_timeout_secs(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        _ => {
            tracing::warn!(value = %raw, "API_TIMEOUT_SECS must be a positive integer, using default");
            DEFAULT_TIMEOUT_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://api.example.com/ ");
        assert_eq!(config.api_url, "http://api.example.com");
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.studio_password, DEMO_STUDIO_PASSWORD);
    }

    #[test]
    fn timeout_must_be_positive() {
        assert_eq!(parse_timeout_secs("45"), 45);
        assert_eq!(parse_timeout_secs("0"), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs("soon"), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs("-5"), DEFAULT_TIMEOUT_SECS);
    }
}
