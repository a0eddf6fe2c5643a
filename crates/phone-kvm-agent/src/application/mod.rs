//! Application layer use cases for the agent.
//!
//! # What use cases does the agent have?
//!
//! - **`gestures`** – Turns a [`Gesture`](phone_kvm_core::Gesture) into an
//!   ordered, time-paced series of bridge calls (pointer moves, button
//!   events, key shortcuts) and, for text and app launches, a push to the
//!   clipboard relay.
//!
//! - **`screenshot`** – Fetches a snapshot from the bridge, crops black
//!   borders, and substitutes a safe placeholder whenever anything fails.
//!
//! Both use cases run every operation through the **`guard`**, which marks the
//! bridge's USB HID device as connected first.
//!
//! The seams to the outside world are traits defined here and implemented in
//! the infrastructure layer:
//!
//! - **`transport`** – [`HidTransport`]: authenticated HTTPS to the bridge.
//! - **`relay`** – [`ClipboardRelay`]: best-effort pushes to the relay server.
//! - **`screenshot`** – [`FrameProcessor`]: CPU-bound image clean-up.

pub mod gestures;
pub mod guard;
pub mod relay;
pub mod screenshot;
pub mod transport;

pub use gestures::GestureEngine;
pub use guard::ConnectionGuard;
pub use relay::{ClipboardRelay, RelayError};
pub use screenshot::{FrameError, FrameProcessor, ProcessedFrame, ScreenshotService};
pub use transport::{HidTransport, HttpsResponse, RequestBody, RequestOptions, TransportError};
