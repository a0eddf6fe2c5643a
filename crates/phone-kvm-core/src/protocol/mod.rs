//! Wire vocabulary: bridge endpoint strings and relay payloads.

pub mod endpoints;
pub mod relay;

pub use endpoints::{mouse_button, mouse_move, shortcut, ButtonState, SET_CONNECTED, SNAPSHOT};
pub use relay::{ContentPayload, ContentResponse, CONTENT_PATH};
