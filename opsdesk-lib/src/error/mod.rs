//! Error types

mod api;
mod store;

pub use api::*;
pub use store::*;

/// Top-level error for console operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend call failed (transport, non-2xx status or unreadable body).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The persisted key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns the human-readable message shown to the user.
    ///
    /// Backend errors yield the server's `detail` text alone, without the
    /// status prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::Api(ApiError::Http { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the HTTP status code if the backend answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }
}
