//! Client error types and HTTP failure classification.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect failure, timeout).
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    /// The store rejected a write because a unique value already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify a non-success response.
    ///
    /// Uniqueness violations are reported as [`ClientError::Conflict`] whether
    /// the store answers 409 or surfaces the database error text under another
    /// status.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);

        if status == StatusCode::CONFLICT || is_conflict_message(&message) {
            return Self::Conflict(message);
        }

        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network("request timed out".to_string())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

fn is_conflict_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("already exists") || lower.contains("unique")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
    #[serde(default)]
    error: Option<String>,
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": "..."}`, `{"message": ["...", "..."]}` and
/// `{"error": "..."}`; anything else is returned as trimmed text.
fn extract_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match (parsed.message, parsed.error) {
            (Some(ErrorMessage::One(m)), _) => return m,
            (Some(ErrorMessage::Many(ms)), _) if !ms.is_empty() => return ms.join("; "),
            (_, Some(e)) => return e,
            _ => {}
        }
    }
    body.trim().to_string()
}
