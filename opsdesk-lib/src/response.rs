//! Response envelopes and decoded bodies

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::error::Error;

/// A decoded response body.
///
/// The backend answers with JSON for reads and most writes, with an empty
/// body for `204 No Content`, and occasionally with plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A JSON document (`Content-Type: application/json`).
    Json(Value),
    /// Any other non-empty body.
    Text(String),
    /// No body at all.
    Empty,
}

impl Body {
    /// Returns `true` if there was no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Decodes the body as `T`.
    ///
    /// Text bodies are parsed as JSON too, for backends that omit the
    /// content type.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::parse(e.to_string()).into())
            }
            Self::Text(text) => serde_json::from_str(&text)
                .map_err(|e| ApiError::parse_with_body(e.to_string(), text).into()),
            Self::Empty => Err(ApiError::parse("empty response body").into()),
        }
    }

    /// Returns the body as text.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
            Self::Empty => String::new(),
        }
    }
}

/// The `{results: [...]}` list envelope used by every collection endpoint.
///
/// Paginated endpoints also report the page they served and the total.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> ListEnvelope<T> {
    /// Consumes the envelope and returns the items.
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

/// The `{id}` answer of create calls.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Created {
    pub id: i64,
}
