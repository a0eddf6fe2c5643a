//! JSON payloads of the clipboard relay.
//!
//! The relay is a one-slot mailbox: the agent `POST`s a payload to
//! [`CONTENT_PATH`], and a companion app on the phone polls `GET` on the same
//! path.  When `launch_app` is set, the content is a URL scheme to open rather
//! than text to paste.

use serde::{Deserialize, Serialize};

/// Path of the relay's single resource.
pub const CONTENT_PATH: &str = "/content";

/// Body of `POST /content`, and the value held by the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    pub content: String,
    pub launch_app: bool,
}

impl ContentPayload {
    /// Text to be pasted into the focused field.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            launch_app: false,
        }
    }

    /// URL scheme to be opened by the companion app.
    pub fn launch(scheme: impl Into<String>) -> Self {
        Self {
            content: scheme.into(),
            launch_app: true,
        }
    }
}

/// Response of both relay routes.
///
/// `launch_app` is only present when it is `true`; companion apps treat a
/// missing field as "paste".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentResponse {
    pub success: bool,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_app: Option<bool>,
}

impl From<&ContentPayload> for ContentResponse {
    fn from(payload: &ContentPayload) -> Self {
        Self {
            success: true,
            content: payload.content.clone(),
            launch_app: payload.launch_app.then_some(true),
        }
    }
}
