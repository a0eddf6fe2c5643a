//! Recording transport: a bridge that only remembers what it was asked.
//!
//! Used by `phone-kvm --dry-run` to show the calls a gesture would make
//! without touching a real device, and by tests to assert call order and
//! pacing.  Each call is stamped with `tokio::time::Instant`, so under a
//! paused test clock the timestamps are exact virtual times.
//!
//! ```ignore
//! let transport = Arc::new(RecordingTransport::new());
//! let engine = GestureEngine::new(transport.clone(), relay, PacingConfig::default());
//!
//! engine.tap(540, 1200).await?;
//!
//! assert_eq!(transport.endpoints()[1], "/api/hid/events/send_mouse_move?to_x=540&to_y=1200");
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::info;

use crate::application::transport::{HidTransport, HttpsResponse, RequestOptions, TransportError};

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Normalized (upper-case) method.
    pub method: String,
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub at: Instant,
}

/// A [`HidTransport`] that records calls and answers `200 OK`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    body: Vec<u8>,
    fail_on: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body returned by every successful call (snapshots, mostly).
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Fails every call whose endpoint contains `fragment`.  The failed call is
    /// still recorded.
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.fail_on = Some(fragment.into());
        self
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.endpoint).collect()
    }
}

#[async_trait]
impl HidTransport for RecordingTransport {
    async fn request(
        &self,
        endpoint: &str,
        method: &str,
        options: RequestOptions,
    ) -> Result<HttpsResponse, TransportError> {
        let method = match method.trim().to_ascii_uppercase() {
            m if m.is_empty() => "GET".to_string(),
            m => m,
        };
        info!(%method, endpoint, "dry run: bridge call");

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                method: method.clone(),
                endpoint: endpoint.to_string(),
                timeout: options.timeout,
                at: Instant::now(),
            });

        if let Some(fragment) = &self.fail_on {
            if endpoint.contains(fragment.as_str()) {
                return Err(TransportError::Connect {
                    method,
                    url: endpoint.to_string(),
                    message: "injected failure".into(),
                });
            }
        }

        Ok(HttpsResponse {
            url: endpoint.to_string(),
            status: 200,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}
