use std::path::PathBuf;

use tofula_client::ClientConfig;

/// Directory holding the session file when `TOFULA_STATE_DIR` is unset.
pub const DEFAULT_STATE_DIR: &str = ".tofula";

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "tofula=info,tofula_client=info";

/// Shape of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything other than `json` means text.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Terminal front-end configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Where the session file lives.
    pub state_dir: PathBuf,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `NEXT_PUBLIC_API_URL` | `http://localhost:8000` |
    /// | `API_TIMEOUT_SECS`    | `300`                   |
    /// | `STUDIO_PASSWORD`     | `Tofula@2025`           |
    /// | `TOFULA_STATE_DIR`    | `.tofula`               |
    /// | `LOG_FORMAT`          | `text`                  |
    pub fn from_env() -> Self {
        let state_dir = std::env::var("TOFULA_STATE_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATE_DIR.into());

        Self {
            client: ClientConfig::from_env(),
            state_dir: PathBuf::from(state_dir),
            log_format: LogFormat::from_env(),
        }
    }
}
