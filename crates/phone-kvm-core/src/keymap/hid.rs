//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page) and their DOM names.
//!
//! The KVM bridge injects keys as a USB keyboard, but its HTTP API names keys
//! the way browsers do: by the DOM `KeyboardEvent.code` string (`"KeyC"`,
//! `"AltLeft"`, `"MetaRight"`).  Every [`HidKeyCode`] variant is spelled exactly
//! like its DOM code, so the name on the wire is just the variant name.
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  These numbers are called *Usage IDs* and they are
//! grouped by *Usage Page*.  All keyboard keys are on page 0x07 ("Keyboard/Keypad").
//!
//! | Key          | HID Usage ID | DOM code      |
//! |--------------|--------------|---------------|
//! | Letter A     | 0x04         | `KeyA`        |
//! | Enter        | 0x28         | `Enter`       |
//! | Left Alt     | 0xE2         | `AltLeft`     |
//! | Right Meta   | 0xE7         | `MetaRight`   |
//!
//! HID codes represent **physical key positions**, not characters.  The
//! character a key produces depends on the keyboard layout configured on the
//! controlled device, which is why shortcuts are expressed as positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a DOM code string does not name a known key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown key name: {0:?}")]
pub struct UnknownKeyName(pub String);

/// Declares [`HidKeyCode`] from one table so the variant list, the usage IDs,
/// and the DOM names can never drift apart.
macro_rules! hid_keys {
    ($($(#[$doc:meta])* $variant:ident = $usage:literal),* $(,)?) => {
        /// USB HID Usage ID for keyboard keys (page 0x07).
        ///
        /// The numeric value of each variant is its HID Usage ID; its name is
        /// the DOM `KeyboardEvent.code` used by the bridge's shortcut endpoint.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u16)]
        pub enum HidKeyCode {
            $($(#[$doc])* $variant = $usage),*
        }

        impl HidKeyCode {
            /// Every key in declaration order.
            pub const ALL: &'static [HidKeyCode] = &[$(HidKeyCode::$variant),*];

            /// Returns the DOM `KeyboardEvent.code` name for this key.
            pub fn dom_code(self) -> &'static str {
                match self {
                    $(HidKeyCode::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

hid_keys! {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04, KeyB = 0x05, KeyC = 0x06, KeyD = 0x07, KeyE = 0x08, KeyF = 0x09,
    KeyG = 0x0A, KeyH = 0x0B, KeyI = 0x0C, KeyJ = 0x0D, KeyK = 0x0E, KeyL = 0x0F,
    KeyM = 0x10, KeyN = 0x11, KeyO = 0x12, KeyP = 0x13, KeyQ = 0x14, KeyR = 0x15,
    KeyS = 0x16, KeyT = 0x17, KeyU = 0x18, KeyV = 0x19, KeyW = 0x1A, KeyX = 0x1B,
    KeyY = 0x1C, KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E, Digit2 = 0x1F, Digit3 = 0x20, Digit4 = 0x21, Digit5 = 0x22,
    Digit6 = 0x23, Digit7 = 0x24, Digit8 = 0x25, Digit9 = 0x26, Digit0 = 0x27,

    // Control and punctuation keys (HID 0x28–0x38)
    Enter = 0x28, Escape = 0x29, Backspace = 0x2A, Tab = 0x2B, Space = 0x2C,
    Minus = 0x2D, Equal = 0x2E, BracketLeft = 0x2F, BracketRight = 0x30,
    Backslash = 0x31, Semicolon = 0x33, Quote = 0x34, Backquote = 0x35,
    Comma = 0x36, Period = 0x37, Slash = 0x38,

    CapsLock = 0x39,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A, F2 = 0x3B, F3 = 0x3C, F4 = 0x3D, F5 = 0x3E, F6 = 0x3F,
    F7 = 0x40, F8 = 0x41, F9 = 0x42, F10 = 0x43, F11 = 0x44, F12 = 0x45,

    // Navigation cluster (HID 0x49–0x52)
    Insert = 0x49, Home = 0x4A, PageUp = 0x4B, Delete = 0x4C, End = 0x4D,
    PageDown = 0x4E, ArrowRight = 0x4F, ArrowLeft = 0x50, ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Modifier keys (HID 0xE0–0xE7)
    ControlLeft = 0xE0, ShiftLeft = 0xE1, AltLeft = 0xE2, MetaLeft = 0xE3,
    ControlRight = 0xE4, ShiftRight = 0xE5, AltRight = 0xE6, MetaRight = 0xE7,
}

impl FromStr for HidKeyCode {
    type Err = UnknownKeyName;

    /// Parses a DOM code (`"KeyC"`, `"AltLeft"`).  Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HidKeyCode::ALL
            .iter()
            .copied()
            .find(|key| key.dom_code() == s)
            .ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

impl fmt::Display for HidKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_code())
    }
}
