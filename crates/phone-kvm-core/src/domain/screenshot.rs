//! Screenshot result and the settings of the capture pipeline.

use serde::{Deserialize, Serialize};

/// A captured (or substituted) frame.
///
/// `is_sensitive == true` means the pixels must not be trusted: either the
/// phone blanked the screen on purpose (payment and password screens are
/// rendered black to capture devices) or capture failed.  The two cases are
/// indistinguishable from outside, so both produce the same placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Image bytes, standard base64 with padding.
    pub base64_data: String,
    pub width: u32,
    pub height: u32,
    pub is_sensitive: bool,
}

/// Settings of the screenshot pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Width of the black placeholder returned on failure.
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u32,
    /// Height of the black placeholder returned on failure.
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,
    /// Luma at or below this value counts as black border.
    #[serde(default = "default_black_threshold")]
    pub black_threshold: u8,
}

fn default_fallback_width() -> u32 {
    1080
}
fn default_fallback_height() -> u32 {
    2400
}
fn default_black_threshold() -> u8 {
    15
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            fallback_width: default_fallback_width(),
            fallback_height: default_fallback_height(),
            black_threshold: default_black_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fallback_is_portrait_1080_by_2400() {
        let cfg = ScreenshotConfig::default();
        assert_eq!((cfg.fallback_width, cfg.fallback_height), (1080, 2400));
        assert_eq!(cfg.black_threshold, 15);
    }

    #[test]
    fn test_screenshot_serializes_field_names() {
        let shot = Screenshot {
            base64_data: "AA==".into(),
            width: 1,
            height: 2,
            is_sensitive: false,
        };
        let value = serde_json::to_value(&shot).unwrap();
        assert_eq!(value["base64_data"], "AA==");
        assert_eq!(value["is_sensitive"], false);
    }
}
