//! The transport seam between the use cases and the KVM bridge.
//!
//! Use cases never talk HTTP directly.  They hold an `Arc<dyn HidTransport>`
//! and issue requests by endpoint string; the production implementation is
//! `infrastructure::transport::HttpsClient`, and tests substitute a recording
//! double.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure of a single bridge request.  Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("invalid request header {0:?}")]
    InvalidHeader(String),

    #[error("failed to serialize JSON body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("could not build HTTPS client: {0}")]
    Client(String),

    #[error("{method} {url} timed out")]
    Timeout { method: String, url: String },

    #[error("{method} {url}: connection failed: {message}")]
    Connect {
        method: String,
        url: String,
        message: String,
    },

    #[error("{method} {url} failed: {message}")]
    Request {
        method: String,
        url: String,
        message: String,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },
}

/// Request body variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Sent as-is.
    Raw(Vec<u8>),
    /// Serialized with `serde_json`; sets a JSON content type unless the
    /// caller already supplied one.
    Json(serde_json::Value),
}

/// Per-request options.  The default is "no extra headers, no body, client
/// timeout".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
    /// Overrides the client-wide timeout for this call.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn raw(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A completed 2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpsResponse {
    /// The fully joined request URL.
    pub url: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpsResponse {
    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Authenticated request/response access to the KVM bridge.
///
/// Implementations must be safe to share, but callers serialize gestures, so
/// requests from one session never overlap.
#[async_trait]
pub trait HidTransport: Send + Sync {
    /// Sends `method` to `endpoint` (path and query, joined onto the base URL).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for connect, TLS, timeout and non-2xx
    /// failures.  The error is also logged by the implementation.
    async fn request(
        &self,
        endpoint: &str,
        method: &str,
        options: RequestOptions,
    ) -> Result<HttpsResponse, TransportError>;

    /// `POST` with no body, the shape of every HID call.
    async fn post(&self, endpoint: &str) -> Result<HttpsResponse, TransportError> {
        self.request(endpoint, "POST", RequestOptions::default())
            .await
    }
}
