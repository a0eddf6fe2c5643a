//! Connection-state guard.
//!
//! The bridge's virtual USB device can be detached from the phone (by the web
//! UI, by a reboot of either side).  Every guarded operation therefore starts
//! with `set_connected`, which is cheap and idempotent.  The response body is
//! ignored; only transport success matters.

use std::future::Future;
use std::sync::Arc;

use phone_kvm_core::protocol::SET_CONNECTED;
use tracing::debug;

use super::transport::{HidTransport, TransportError};

/// Issues `set_connected` before running an operation.
#[derive(Clone)]
pub struct ConnectionGuard {
    transport: Arc<dyn HidTransport>,
}

impl ConnectionGuard {
    pub fn new(transport: Arc<dyn HidTransport>) -> Self {
        Self { transport }
    }

    /// Marks the bridge's HID device as connected.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] of the `set_connected` call.
    pub async fn connect(&self) -> Result<(), TransportError> {
        debug!("set_connected");
        self.transport.post(SET_CONNECTED).await?;
        Ok(())
    }

    /// Connects, then runs `op`.
    ///
    /// `op` is not started when `set_connected` fails.
    ///
    /// # Errors
    ///
    /// Returns the guard's [`TransportError`], or whatever `op` returns.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, TransportError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        self.connect().await?;
        op().await
    }
}
