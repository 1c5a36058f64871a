use tofula_core::error::CoreError;

/// Errors from the API access layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered 401. The session has already been ended and
    /// the login redirect issued when this is returned.
    #[error("Not signed in or session expired")]
    Unauthorized,

    /// The backend returned a non-2xx status other than 401.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend `detail` message, or the raw body or reason phrase when
        /// there is none.
        message: String,
        /// The backend's own string `detail`, when it sent one.
        detail: Option<String>,
    },

    /// A 2xx body did not match the expected schema.
    #[error("Malformed response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Client-side validation failed; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The backend's string `detail` for an error response. Validation
    /// lists and empty or non-JSON bodies have none.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Short message suitable for showing on a page.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(e) if e.is_timeout() => "The request timed out.".to_string(),
            ApiError::Request(_) => "Could not reach the server.".to_string(),
            ApiError::Unauthorized => "Please sign in again.".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Decode { .. } => "The server sent an unexpected response.".to_string(),
            ApiError::Invalid(CoreError::Validation(msg)) => msg.clone(),
            ApiError::Invalid(other) => other.to_string(),
            ApiError::Config(msg) => msg.clone(),
        }
    }
}

/// The string message in an error body, if any.
///
/// The backend reports errors as `{"detail": "..."}`; validation failures
/// carry a list under `detail` instead and yield `None`.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(body).ok()? {
        serde_json::Value::Object(map) => ["detail", "error", "message"]
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(serde_json::Value::String(msg)) if !msg.trim().is_empty() => Some(msg.clone()),
                _ => None,
            }),
        _ => None,
    }
}

/// Message for an error response: the detail, else the raw body, else
/// `fallback`.
pub(crate) fn error_message(body: &str, detail: Option<&str>, fallback: &str) -> String {
    match detail {
        Some(detail) => detail.to_string(),
        None if body.trim().is_empty() => fallback.to_string(),
        None => body.to_string(),
    }
}
