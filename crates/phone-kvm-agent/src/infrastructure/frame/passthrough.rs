//! Pass-through: return the snapshot unchanged.
//!
//! Only the image header is read, to report the pixel size; the pixel data is
//! never decoded.

use std::io::Cursor;

use image::ImageReader;

use crate::application::screenshot::{FrameError, FrameProcessor, ProcessedFrame};

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProcessor;

impl FrameProcessor for PassthroughProcessor {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn process(&self, frame: &[u8]) -> Result<ProcessedFrame, FrameError> {
        let (width, height) = ImageReader::new(Cursor::new(frame))
            .with_guessed_format()
            .map_err(|e| FrameError::Decode(e.to_string()))?
            .into_dimensions()
            .map_err(|e| FrameError::Decode(e.to_string()))?;

        Ok(ProcessedFrame::Image {
            bytes: frame.to_vec(),
            width,
            height,
        })
    }
}
