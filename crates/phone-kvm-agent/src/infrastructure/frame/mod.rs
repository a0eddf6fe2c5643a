//! Frame processors and the sensitive-screen placeholder.
//!
//! The processor is chosen once, when the screenshot service is built:
//!
//! | Build                       | Primary processor       |
//! |-----------------------------|-------------------------|
//! | default (`border-crop`)     | [`BorderCropProcessor`] |
//! | `--no-default-features`     | [`PassthroughProcessor`]|
//!
//! [`PassthroughProcessor`] is also the fallback when the primary processor
//! fails on a frame.

#[cfg(feature = "border-crop")]
pub mod border_crop;
pub mod passthrough;

use std::io::Cursor;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use phone_kvm_core::{Screenshot, ScreenshotConfig};

use crate::application::screenshot::{FrameError, FrameProcessor, ScreenshotService};
use crate::application::transport::HidTransport;

#[cfg(feature = "border-crop")]
pub use border_crop::BorderCropProcessor;
pub use passthrough::PassthroughProcessor;

/// The primary processor for this build.
#[cfg(feature = "border-crop")]
pub fn select_frame_processor(config: &ScreenshotConfig) -> Arc<dyn FrameProcessor> {
    Arc::new(BorderCropProcessor::new(config.black_threshold))
}

/// The primary processor for this build.
#[cfg(not(feature = "border-crop"))]
pub fn select_frame_processor(_config: &ScreenshotConfig) -> Arc<dyn FrameProcessor> {
    Arc::new(PassthroughProcessor)
}

/// Solid black PNG of the given size.
///
/// # Errors
///
/// Returns [`FrameError::Encode`] if PNG encoding fails.
pub fn black_png(width: u32, height: u32) -> Result<Vec<u8>, FrameError> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| FrameError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// The screenshot returned for blank screens and failed captures.
///
/// # Errors
///
/// Returns [`FrameError::Encode`] if PNG encoding fails.
pub fn sensitive_placeholder(config: &ScreenshotConfig) -> Result<Screenshot, FrameError> {
    let png = black_png(config.fallback_width, config.fallback_height)?;
    Ok(Screenshot {
        base64_data: STANDARD.encode(png),
        width: config.fallback_width,
        height: config.fallback_height,
        is_sensitive: true,
    })
}

/// Wires the build's processors and a freshly rendered placeholder into a
/// [`ScreenshotService`].
///
/// # Errors
///
/// Returns [`FrameError::Encode`] if the placeholder cannot be rendered.
pub fn screenshot_service(
    transport: Arc<dyn HidTransport>,
    config: &ScreenshotConfig,
) -> Result<ScreenshotService, FrameError> {
    Ok(ScreenshotService::new(
        transport,
        select_frame_processor(config),
        Arc::new(PassthroughProcessor),
        sensitive_placeholder(config)?,
    ))
}
