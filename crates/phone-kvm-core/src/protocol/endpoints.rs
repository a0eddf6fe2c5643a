//! Endpoint strings understood by the KVM bridge.
//!
//! An endpoint is an opaque path plus query string.  These builders are the
//! only place the query vocabulary is spelled out; the transport joins them
//! onto the configured base URL verbatim.
//!
//! ```text
//! POST /api/hid/set_connected?connected=1
//! POST /api/hid/events/send_mouse_move?to_x=<x>&to_y=<y>
//! POST /api/hid/events/send_mouse_button?button=left[&state=0|1]
//! POST /api/hid/events/send_shortcut?keys=<Key1>,<Key2>
//! GET  /streamer/snapshot
//! ```

use crate::keymap::Shortcut;

/// Marks the bridge's USB HID device as connected to the target.
pub const SET_CONNECTED: &str = "/api/hid/set_connected?connected=1";

/// Raw frame from the video streamer (JPEG on PiKVM).
pub const SNAPSHOT: &str = "/streamer/snapshot";

/// What a `send_mouse_button` call does with the left button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// No `state` parameter: the bridge presses and releases.
    Click,
    /// `state=1`: press and hold.
    Down,
    /// `state=0`: release.
    Up,
}

/// Absolute pointer move.  Coordinates are passed through unchecked, so the
/// bridge's clamping (e.g. `±32500` to reach screen edges) applies.
pub fn mouse_move(x: i32, y: i32) -> String {
    format!("/api/hid/events/send_mouse_move?to_x={x}&to_y={y}")
}

/// Left-button event.
pub fn mouse_button(state: ButtonState) -> String {
    let base = "/api/hid/events/send_mouse_button?button=left";
    match state {
        ButtonState::Click => base.to_string(),
        ButtonState::Down => format!("{base}&state=1"),
        ButtonState::Up => format!("{base}&state=0"),
    }
}

/// Key combination.
pub fn shortcut(keys: &Shortcut) -> String {
    format!(
        "/api/hid/events/send_shortcut?keys={}",
        keys.to_query_value()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_move_embeds_coordinates_verbatim() {
        assert_eq!(
            mouse_move(540, 1200),
            "/api/hid/events/send_mouse_move?to_x=540&to_y=1200"
        );
        assert_eq!(
            mouse_move(-32500, 0),
            "/api/hid/events/send_mouse_move?to_x=-32500&to_y=0"
        );
    }

    #[test]
    fn test_mouse_button_states() {
        assert_eq!(
            mouse_button(ButtonState::Click),
            "/api/hid/events/send_mouse_button?button=left"
        );
        assert_eq!(
            mouse_button(ButtonState::Down),
            "/api/hid/events/send_mouse_button?button=left&state=1"
        );
        assert_eq!(
            mouse_button(ButtonState::Up),
            "/api/hid/events/send_mouse_button?button=left&state=0"
        );
    }

    #[test]
    fn test_shortcut_endpoint() {
        assert_eq!(
            shortcut(&Shortcut::home()),
            "/api/hid/events/send_shortcut?keys=AltLeft,KeyH"
        );
    }
}
