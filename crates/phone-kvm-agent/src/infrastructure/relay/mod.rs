//! HTTP client for the clipboard relay (`phone-kvm-relay`).

use std::time::Duration;

use async_trait::async_trait;
use phone_kvm_core::{protocol::CONTENT_PATH, ContentPayload};
use tracing::debug;

use crate::application::relay::{ClipboardRelay, RelayError};

/// Upper bound on one relay push.
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(3);

/// Pushes payloads with `POST {base}/content`.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    content_url: String,
}

impl HttpRelayClient {
    /// # Errors
    ///
    /// Returns [`RelayError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RelayError> {
        let content_url = format!("{}{CONTENT_PATH}", base_url.trim_end_matches('/'));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Request {
                url: content_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            content_url,
        })
    }

    pub fn content_url(&self) -> &str {
        &self.content_url
    }
}

#[async_trait]
impl ClipboardRelay for HttpRelayClient {
    async fn push(&self, payload: &ContentPayload) -> Result<(), RelayError> {
        let response = self
            .client
            .post(&self.content_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::Request {
                url: self.content_url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                url: self.content_url.clone(),
                status: status.as_u16(),
            });
        }
        debug!(launch_app = payload.launch_app, "relay payload stored");
        Ok(())
    }
}
