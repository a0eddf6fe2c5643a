//! Clipboard relay seam.
//!
//! The phone cannot receive text over a HID keyboard reliably (layouts, IME,
//! non-Latin scripts), so text and app-launch URLs are parked in a relay that
//! a companion app on the phone polls.  Pushes are best-effort: the gesture
//! engine logs a failed push and carries on.

use async_trait::async_trait;
use phone_kvm_core::ContentPayload;
use thiserror::Error;

/// Failure to push a payload to the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("relay at {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Producer side of the clipboard relay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipboardRelay: Send + Sync {
    /// Replaces the relay's current payload.
    async fn push(&self, payload: &ContentPayload) -> Result<(), RelayError>;
}
