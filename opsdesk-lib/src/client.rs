//! Main OpsClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::error::Error;
use crate::response::Body;
use crate::response::Created;

/// The client for the operations backend.
///
/// Every request carries the session cookie obtained at login and sends
/// JSON. Error responses are normalized into [`ApiError`].
///
/// This client is cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use opsdesk_lib::OpsClient;
///
/// let client = OpsClient::builder()
///     .url("http://localhost:8000/api/v1")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// client.login(&Credentials::new("admin", "admin")).await?;
/// let sites = client.sites(1, 50).await?;
/// ```
#[derive(Clone)]
pub struct OpsClient {
    inner: Arc<OpsClientInner>,
}

struct OpsClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl OpsClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> OpsClientBuilder<Missing> {
        OpsClientBuilder::new()
    }

    /// Returns the base URL all request paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url.trim_end_matches('/'), path)
    }

    /// Sends a request and decodes the body by content type.
    ///
    /// This is the low-level request method used by all API operations.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Body, Error> {
        let url = self.build_url(path);
        log::debug!("{} {}", method, url);

        let mut request = self
            .inner
            .http_client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let text = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            log::debug!("{} {} failed with {}", method, url, status);
            return Err(
                ApiError::from_error_body(status.as_u16(), status.canonical_reason(), &text).into(),
            );
        }

        if text.is_empty() {
            Ok(Body::Empty)
        } else if is_json {
            serde_json::from_str(&text)
                .map(Body::Json)
                .map_err(|e| ApiError::parse_with_body(e.to_string(), text).into())
        } else {
            Ok(Body::Text(text))
        }
    }

    /// `GET` a path and decode the JSON answer.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::GET, path, None).await?.json()
    }

    /// `POST` a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Body, Error> {
        let body = serde_json::to_string(body)?;
        self.request(Method::POST, path, Some(body)).await
    }

    /// `PUT` a JSON body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Body, Error> {
        let body = serde_json::to_string(body)?;
        self.request(Method::PUT, path, Some(body)).await
    }

    /// `DELETE` a path.
    pub async fn delete(&self, path: &str) -> Result<Body, Error> {
        self.request(Method::DELETE, path, None).await
    }

    /// `POST` a JSON body to a collection and return the created id.
    pub(crate) async fn create<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<i64, Error> {
        let created: Created = self.post(path, body).await?.json()?;
        Ok(created.id)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`OpsClient`].
///
/// Uses the typestate pattern so `build()` is only available once the base
/// URL is set.
pub struct OpsClientBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl OpsClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend base URL, e.g. `http://host/api/v1`.
    pub fn url(self, url: impl Into<String>) -> OpsClientBuilder<Set<String>> {
        OpsClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for OpsClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> OpsClientBuilder<U> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the default HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// The client must keep a cookie store for the session to survive
    /// between calls.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl OpsClientBuilder<Set<String>> {
    /// Builds the [`OpsClient`].
    pub fn build(self) -> Result<OpsClient, Error> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().cookie_store(true);
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(OpsClient {
            inner: Arc::new(OpsClientInner {
                base_url: self.url.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
