//! Key shortcuts sent to the bridge's `send_shortcut` endpoint.
//!
//! The canonical key representation is USB HID Usage IDs (see [`hid`]); on the
//! wire a shortcut is the comma-separated list of DOM code names, pressed in
//! order and released together by the bridge.

pub mod hid;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use hid::{HidKeyCode, UnknownKeyName};

/// Errors produced when parsing a shortcut from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("shortcut must contain at least one key")]
    Empty,
    #[error(transparent)]
    UnknownKey(#[from] UnknownKeyName),
}

/// An ordered key combination such as `AltLeft,KeyC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shortcut(Vec<HidKeyCode>);

impl Shortcut {
    /// Builds a shortcut from keys in press order.
    pub fn new(keys: impl Into<Vec<HidKeyCode>>) -> Self {
        Self(keys.into())
    }

    pub fn keys(&self) -> &[HidKeyCode] {
        &self.0
    }

    /// The `keys=` query value: DOM codes joined by commas.
    pub fn to_query_value(&self) -> String {
        self.0
            .iter()
            .map(|k| k.dom_code())
            .collect::<Vec<_>>()
            .join(",")
    }

    // ── Bindings configured on the controlled device ──────────────────────────
    //
    // The phone interprets these combinations through its own keyboard
    // shortcut settings and the companion app; they are not OS defaults.

    /// Navigate back.
    pub fn back() -> Self {
        Self::new([HidKeyCode::Tab, HidKeyCode::KeyB])
    }

    /// Return to the home screen.
    pub fn home() -> Self {
        Self::new([HidKeyCode::AltLeft, HidKeyCode::KeyH])
    }

    /// Makes the companion app pull the relay content onto the device clipboard.
    pub fn copy() -> Self {
        Self::new([HidKeyCode::AltLeft, HidKeyCode::KeyC])
    }

    /// Opens the URL scheme currently on the device clipboard.
    pub fn open_url() -> Self {
        Self::new([HidKeyCode::AltLeft, HidKeyCode::KeyO])
    }

    /// Pastes the device clipboard into the focused field.
    pub fn paste() -> Self {
        Self::new([HidKeyCode::MetaRight, HidKeyCode::KeyV])
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    /// Parses `"AltLeft,KeyC"`.  Whitespace around names is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keys = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(HidKeyCode::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if keys.is_empty() {
            return Err(ShortcutError::Empty);
        }
        Ok(Self(keys))
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_joins_dom_codes_with_commas() {
        assert_eq!(Shortcut::copy().to_query_value(), "AltLeft,KeyC");
        assert_eq!(Shortcut::back().to_query_value(), "Tab,KeyB");
        assert_eq!(Shortcut::home().to_query_value(), "AltLeft,KeyH");
        assert_eq!(Shortcut::open_url().to_query_value(), "AltLeft,KeyO");
        assert_eq!(Shortcut::paste().to_query_value(), "MetaRight,KeyV");
    }

    #[test]
    fn test_parse_accepts_spaces_around_names() {
        // Act
        let shortcut: Shortcut = "ControlLeft, ShiftLeft ,KeyZ".parse().unwrap();

        // Assert
        assert_eq!(
            shortcut.keys(),
            &[HidKeyCode::ControlLeft, HidKeyCode::ShiftLeft, HidKeyCode::KeyZ]
        );
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!("".parse::<Shortcut>(), Err(ShortcutError::Empty));
        assert_eq!(" , ".parse::<Shortcut>(), Err(ShortcutError::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = "AltLeft,Hyper".parse::<Shortcut>().unwrap_err();
        assert_eq!(err, ShortcutError::UnknownKey(UnknownKeyName("Hyper".into())));
    }

    #[test]
    fn test_shortcut_serializes_as_name_list() {
        let json = serde_json::to_string(&Shortcut::copy()).unwrap();
        assert_eq!(json, r#"["AltLeft","KeyC"]"#);
    }
}
