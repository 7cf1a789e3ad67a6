//! API error types

use serde_json::Value;

/// Errors that can occur during backend calls.
///
/// Transport failures, structured `{detail}` error bodies and unstructured
/// error bodies all end up here with a readable message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response from the backend.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message, taken from the body's `detail` when present.
        message: String,
    },

    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse a successful response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Builds the error for a non-2xx response from its raw body.
    ///
    /// A JSON body contributes its `detail` field, or its whole JSON text
    /// when `detail` is missing or empty. Any other body is used verbatim.
    /// An empty body falls back to the status reason phrase.
    pub fn from_error_body(status: u16, reason: Option<&str>, body: &str) -> Self {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(json) => match json.get("detail") {
                Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
                Some(detail) if !detail.is_null() && detail != &Value::Bool(false) => {
                    detail.to_string()
                }
                _ => json.to_string(),
            },
            Err(_) => body.trim().to_string(),
        };

        let message = if message.is_empty() {
            reason.unwrap_or("Request failed").to_string()
        } else {
            message
        };

        Self::http(status, message)
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for 401/403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}
