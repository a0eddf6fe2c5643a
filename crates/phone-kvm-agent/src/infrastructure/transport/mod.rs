//! Bridge transports.
//!
//! - **`https`** – [`HttpsClient`], the real thing: reqwest over rustls with
//!   Basic auth.
//! - **`recording`** – [`RecordingTransport`], which records calls instead of
//!   sending them (dry runs and tests).

pub mod https;
pub mod recording;

pub use https::{basic_auth_header, join_url, HttpsClient};
pub use recording::{RecordedCall, RecordingTransport};
