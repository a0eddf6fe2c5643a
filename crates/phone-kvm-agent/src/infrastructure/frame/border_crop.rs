//! Border cropping: remove black letterboxing around the phone's picture.
//!
//! HDMI capture of a phone yields a landscape frame with the portrait screen
//! in the middle and black bars on both sides.  The crop keeps the bounding
//! box of every pixel whose BT.601 gray value exceeds the threshold.  If no
//! pixel qualifies the frame is reported as blank, which is how secure screens
//! look to a capture device.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::application::screenshot::{FrameError, FrameProcessor, ProcessedFrame};

/// Crops to the non-black bounding box and re-encodes as PNG.
#[derive(Debug, Clone, Copy)]
pub struct BorderCropProcessor {
    threshold: u8,
}

impl BorderCropProcessor {
    /// Pixels with gray value `> threshold` count as content.
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl FrameProcessor for BorderCropProcessor {
    fn name(&self) -> &'static str {
        "border-crop"
    }

    fn process(&self, frame: &[u8]) -> Result<ProcessedFrame, FrameError> {
        let img = image::load_from_memory(frame).map_err(|e| FrameError::Decode(e.to_string()))?;

        let Some((x, y, width, height)) = content_bounds(&img.to_rgb8(), self.threshold) else {
            return Ok(ProcessedFrame::Blank);
        };

        let cropped = img.crop_imm(x, y, width, height);
        let mut png = Cursor::new(Vec::new());
        cropped
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| FrameError::Encode(e.to_string()))?;

        Ok(ProcessedFrame::Image {
            bytes: png.into_inner(),
            width,
            height,
        })
    }
}

/// BT.601 gray value in 14-bit fixed point, rounded to nearest.
pub fn gray(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    let weighted = u32::from(r) * R + u32::from(g) * G + u32::from(b) * B;
    ((weighted + (1 << 13)) >> 14) as u8
}

/// `(x, y, width, height)` of the pixels whose gray value exceeds `threshold`,
/// inclusive.
pub fn content_bounds(rgb: &RgbImage, threshold: u8) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in rgb.enumerate_pixels() {
        if gray(*pixel) <= threshold {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(img: RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    /// 40x20 black frame with a grey 10x16 "phone" at (15, 2).
    fn letterboxed() -> RgbImage {
        RgbImage::from_fn(40, 20, |x, y| {
            if (15..25).contains(&x) && (2..18).contains(&y) {
                Rgb([120, 120, 120])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_content_bounds_inclusive_box() {
        let mut rgb = RgbImage::new(8, 8);
        rgb.put_pixel(2, 3, Rgb([200, 200, 200]));
        rgb.put_pixel(5, 6, Rgb([16, 16, 16]));

        assert_eq!(content_bounds(&rgb, 15), Some((2, 3, 4, 4)));
    }

    #[test]
    fn test_content_bounds_threshold_is_exclusive() {
        let rgb = RgbImage::from_pixel(4, 4, Rgb([15, 15, 15]));
        assert_eq!(content_bounds(&rgb, 15), None);
    }

    #[test]
    fn test_gray_uses_bt601_weights() {
        assert_eq!(gray(Rgb([255, 255, 255])), 255);
        assert_eq!(gray(Rgb([0, 0, 0])), 0);
        assert_eq!(gray(Rgb([60, 0, 0])), 18);
        assert_eq!(gray(Rgb([0, 0, 200])), 23);
        assert_eq!(gray(Rgb([0, 100, 0])), 59);
    }

    #[test]
    fn test_process_keeps_dim_red_frame() {
        // gray 18: content at threshold 15
        let frame = encode(RgbImage::from_pixel(8, 8, Rgb([60, 0, 0])), ImageFormat::Png);

        let result = BorderCropProcessor::new(15).process(&frame).unwrap();

        assert!(matches!(result, ProcessedFrame::Image { width: 8, height: 8, .. }));
    }

    #[test]
    fn test_process_keeps_dark_blue_frame() {
        // gray 23: content at threshold 15
        let frame = encode(RgbImage::from_pixel(8, 8, Rgb([0, 0, 200])), ImageFormat::Png);

        let result = BorderCropProcessor::new(15).process(&frame).unwrap();

        assert!(matches!(result, ProcessedFrame::Image { width: 8, height: 8, .. }));
    }

    #[test]
    fn test_process_crops_letterbox_to_phone_area() {
        // Arrange
        let frame = encode(letterboxed(), ImageFormat::Png);

        // Act
        let result = BorderCropProcessor::new(15).process(&frame).unwrap();

        // Assert
        let ProcessedFrame::Image { bytes, width, height } = result else {
            panic!("expected an image");
        };
        assert_eq!((width, height), (10, 16));
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (10, 16));
    }

    #[test]
    fn test_process_reports_dark_frame_as_blank() {
        // every pixel at or below the threshold
        let frame = encode(RgbImage::from_pixel(32, 32, Rgb([10, 12, 9])), ImageFormat::Png);

        let result = BorderCropProcessor::new(15).process(&frame).unwrap();

        assert_eq!(result, ProcessedFrame::Blank);
    }

    #[test]
    fn test_process_accepts_jpeg_snapshots() {
        let frame = encode(RgbImage::from_pixel(16, 16, Rgb([200, 200, 200])), ImageFormat::Jpeg);

        let result = BorderCropProcessor::new(15).process(&frame).unwrap();

        assert!(matches!(result, ProcessedFrame::Image { width: 16, height: 16, .. }));
    }

    #[test]
    fn test_process_rejects_garbage() {
        let result = BorderCropProcessor::new(15).process(b"not an image");
        assert!(matches!(result, Err(FrameError::Decode(_))));
    }
}
