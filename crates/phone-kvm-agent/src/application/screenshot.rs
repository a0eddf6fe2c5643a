//! ScreenshotService: fetch a frame, clean it up, never fail.
//!
//! Payment and password screens are rendered black to capture devices, and
//! the bridge's streamer occasionally times out.  The orchestrator cannot act
//! on either, and must not crash on either, so [`ScreenshotService::capture`]
//! has no error path: anything that goes wrong yields the sensitive
//! placeholder (`is_sensitive = true`).
//!
//! ```text
//! set_connected ─► GET /streamer/snapshot ─► primary processor ──ok──► Screenshot
//!        │                  │                   │        └─blank──► placeholder
//!        └──error──► placeholder ◄──error───────┤
//!                                               └─error─► pass-through ──ok──► Screenshot
//!                                                              └─error──► placeholder
//! ```

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use phone_kvm_core::{protocol::SNAPSHOT, Screenshot};
use thiserror::Error;
use tracing::{debug, warn};

use super::guard::ConnectionGuard;
use super::transport::{HidTransport, RequestOptions, TransportError};

/// Failure inside a [`FrameProcessor`].
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("could not decode frame: {0}")]
    Decode(String),
    #[error("could not encode frame: {0}")]
    Encode(String),
}

/// Result of processing one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessedFrame {
    /// Bytes to hand to the orchestrator, with their pixel size.
    Image {
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    },
    /// Nothing visible: treat the screen as sensitive.
    Blank,
}

/// Strategy applied to a raw snapshot.
///
/// Implementations are CPU-bound and are called on a blocking thread.
pub trait FrameProcessor: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &'static str;

    fn process(&self, frame: &[u8]) -> Result<ProcessedFrame, FrameError>;
}

#[derive(Debug, Error)]
enum CaptureError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("frame worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Captures screenshots through the bridge.
pub struct ScreenshotService {
    transport: Arc<dyn HidTransport>,
    guard: ConnectionGuard,
    primary: Arc<dyn FrameProcessor>,
    passthrough: Arc<dyn FrameProcessor>,
    placeholder: Screenshot,
}

impl ScreenshotService {
    /// `primary` is tried first; `passthrough` handles frames `primary`
    /// rejects.  `placeholder` is returned (as-is) whenever capture fails.
    pub fn new(
        transport: Arc<dyn HidTransport>,
        primary: Arc<dyn FrameProcessor>,
        passthrough: Arc<dyn FrameProcessor>,
        placeholder: Screenshot,
    ) -> Self {
        Self {
            guard: ConnectionGuard::new(Arc::clone(&transport)),
            transport,
            primary,
            passthrough,
            placeholder,
        }
    }

    /// The screenshot returned when capture fails or the screen is blank.
    pub fn placeholder(&self) -> &Screenshot {
        &self.placeholder
    }

    /// Fetches and processes one frame.  `timeout` bounds the snapshot call.
    pub async fn capture(&self, timeout: Duration) -> Screenshot {
        match self.try_capture(timeout).await {
            Ok(Some(shot)) => shot,
            Ok(None) => {
                warn!("snapshot is entirely dark; reporting a sensitive screen");
                self.placeholder.clone()
            }
            Err(e) => {
                warn!(error = %e, "screenshot capture failed; reporting a sensitive screen");
                self.placeholder.clone()
            }
        }
    }

    async fn try_capture(&self, timeout: Duration) -> Result<Option<Screenshot>, CaptureError> {
        let response = self
            .guard
            .run(|| {
                self.transport.request(
                    SNAPSHOT,
                    "GET",
                    RequestOptions::default().timeout(timeout),
                )
            })
            .await?;
        debug!(bytes = response.body.len(), "snapshot received");

        let primary = Arc::clone(&self.primary);
        let passthrough = Arc::clone(&self.passthrough);
        let frame = tokio::task::spawn_blocking(move || {
            process_frame(primary.as_ref(), passthrough.as_ref(), &response.body)
        })
        .await??;

        Ok(match frame {
            ProcessedFrame::Image {
                bytes,
                width,
                height,
            } => Some(Screenshot {
                base64_data: STANDARD.encode(bytes),
                width,
                height,
                is_sensitive: false,
            }),
            ProcessedFrame::Blank => None,
        })
    }
}

/// Runs `primary`, falling back to `passthrough` when it errors.
fn process_frame(
    primary: &dyn FrameProcessor,
    passthrough: &dyn FrameProcessor,
    frame: &[u8],
) -> Result<ProcessedFrame, FrameError> {
    match primary.process(frame) {
        Ok(processed) => Ok(processed),
        Err(e) => {
            warn!(
                processor = primary.name(),
                error = %e,
                "frame processing failed; passing the snapshot through"
            );
            passthrough.process(frame)
        }
    }
}
