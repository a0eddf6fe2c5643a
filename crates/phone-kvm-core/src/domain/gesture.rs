//! High-level gesture descriptors.
//!
//! A [`Gesture`] is what an orchestrator asks for ("tap at 540,1200"); the
//! gesture engine in `phone-kvm-agent` turns it into a paced sequence of
//! bridge calls.  Descriptors are plain values: stateless, fully described by
//! their parameters, and serializable so they can arrive as JSON.
//!
//! ```json
//! {"action": "swipe", "start_x": 540, "start_y": 1800, "end_x": 540, "end_y": 600}
//! {"action": "launch_app", "app": "微信"}
//! ```

use serde::{Deserialize, Serialize};

use crate::keymap::Shortcut;

/// Default hold time of a long press.
pub const DEFAULT_LONG_PRESS_MS: i64 = 3000;

/// Default drag time of a swipe.
pub const DEFAULT_SWIPE_MS: i64 = 1000;

fn default_long_press_ms() -> i64 {
    DEFAULT_LONG_PRESS_MS
}

fn default_swipe_ms() -> Option<i64> {
    Some(DEFAULT_SWIPE_MS)
}

/// A named input action in absolute device coordinates.
///
/// Coordinates are not bounds-checked anywhere; values outside the screen are
/// forwarded to the bridge as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Gesture {
    Tap {
        x: i32,
        y: i32,
    },
    DoubleTap {
        x: i32,
        y: i32,
    },
    LongPress {
        x: i32,
        y: i32,
        /// Hold time; negative values are treated as zero.
        #[serde(default = "default_long_press_ms")]
        duration_ms: i64,
    },
    Swipe {
        start_x: i32,
        start_y: i32,
        end_x: i32,
        end_y: i32,
        /// Drag time.  `null`, zero or negative means no interpolation.
        #[serde(default = "default_swipe_ms")]
        duration_ms: Option<i64>,
    },
    KeyShortcut {
        keys: Shortcut,
    },
    Back,
    Home,
    LaunchApp {
        app: String,
    },
    TypeText {
        text: String,
    },
}

impl Gesture {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Tap { .. } => "tap",
            Gesture::DoubleTap { .. } => "double_tap",
            Gesture::LongPress { .. } => "long_press",
            Gesture::Swipe { .. } => "swipe",
            Gesture::KeyShortcut { .. } => "key_shortcut",
            Gesture::Back => "back",
            Gesture::Home => "home",
            Gesture::LaunchApp { .. } => "launch_app",
            Gesture::TypeText { .. } => "type_text",
        }
    }
}

/// What happened when a gesture was performed without a transport error.
///
/// The system is open loop: `Completed` means the calls were issued, not that
/// the phone reacted as intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureOutcome {
    Completed,
    /// `LaunchApp` named an app missing from the registry; nothing was sent.
    AppNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::hid::HidKeyCode;
    use serde_json::json;

    #[test]
    fn test_tap_deserializes_from_tagged_json() {
        let g: Gesture = serde_json::from_value(json!({"action": "tap", "x": 10, "y": -20})).unwrap();
        assert_eq!(g, Gesture::Tap { x: 10, y: -20 });
    }

    #[test]
    fn test_long_press_defaults_to_three_seconds() {
        let g: Gesture =
            serde_json::from_value(json!({"action": "long_press", "x": 1, "y": 2})).unwrap();
        assert_eq!(
            g,
            Gesture::LongPress {
                x: 1,
                y: 2,
                duration_ms: 3000
            }
        );
    }

    #[test]
    fn test_swipe_duration_default_and_explicit_null() {
        // Arrange
        let defaulted = json!({"action": "swipe", "start_x": 0, "start_y": 0, "end_x": 1, "end_y": 1});
        let nulled = json!({"action": "swipe", "start_x": 0, "start_y": 0, "end_x": 1, "end_y": 1, "duration_ms": null});

        // Act
        let a: Gesture = serde_json::from_value(defaulted).unwrap();
        let b: Gesture = serde_json::from_value(nulled).unwrap();

        // Assert
        assert!(matches!(a, Gesture::Swipe { duration_ms: Some(1000), .. }));
        assert!(matches!(b, Gesture::Swipe { duration_ms: None, .. }));
    }

    #[test]
    fn test_unit_variants_and_shortcut() {
        let back: Gesture = serde_json::from_value(json!({"action": "back"})).unwrap();
        assert_eq!(back, Gesture::Back);

        let sc: Gesture = serde_json::from_value(
            json!({"action": "key_shortcut", "keys": ["ControlLeft", "KeyA"]}),
        )
        .unwrap();
        assert_eq!(
            sc,
            Gesture::KeyShortcut {
                keys: Shortcut::new([HidKeyCode::ControlLeft, HidKeyCode::KeyA])
            }
        );
    }

    #[test]
    fn test_launch_app_serializes_with_action_tag() {
        let value = serde_json::to_value(Gesture::LaunchApp { app: "微信".into() }).unwrap();
        assert_eq!(value, json!({"action": "launch_app", "app": "微信"}));
    }

    #[test]
    fn test_names_are_snake_case_tags() {
        assert_eq!(Gesture::Home.name(), "home");
        assert_eq!(Gesture::TypeText { text: String::new() }.name(), "type_text");
    }
}
