//! HTTP client for the point-of-sale backend.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::session::Session;

mod envelope;
mod errors;

pub(crate) use envelope::{Envelope, read_envelope, read_listing};
pub use errors::BackendError;

/// Settings for reaching the backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// API base URL, e.g. `"http://localhost:5000/api"`.
    pub api_url: String,

    /// Bearer token sent with every request, when logged in.
    pub token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Settings taken from a session.
    #[must_use]
    pub fn from_session(session: &Session, timeout: Duration) -> Self {
        Self {
            api_url: session.api_url.clone(),
            token: session.token.clone(),
            timeout,
        }
    }
}

/// Client for the sale, stock, catalog and ticket endpoints.
///
/// Implements every backend-facing service trait; see the `domain` modules
/// for the individual endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    api_url: String,
    token: Option<String>,
    http: Client,
}

impl BackendClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.filter(|token| !token.is_empty()),
            http,
        })
    }

    /// Absolute URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.put(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and reads its `{success, data}` envelope.
    pub(crate) async fn send_enveloped<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "backend response");

        read_envelope(status, &body)
    }

    /// Sends a request and reads a bare or wrapped listing.
    pub(crate) async fn send_listing<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%status, bytes = body.len(), "backend listing");

        read_listing(status, &body)
    }
}
