//! Captured raster buffers.
//!
//! A [`RasterBuffer`] is the pixel image produced by a capture service. It is
//! immutable once captured, owned by the export call that produced it, and
//! dropped when the document has been assembled; per-segment sub-images are
//! equally short-lived.

use image::{imageops, RgbImage};

/// A rectangular pixel image with fixed width and height.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    image: RgbImage,
}

impl RasterBuffer {
    /// Wrap a decoded RGB image.
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Wrap any decoded image, converting to RGB.
    pub fn from_dynamic(image: image::DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying pixel data.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Extract the horizontal band starting at row `offset_px`, `height_px`
    /// rows tall, as a new buffer.
    ///
    /// The band is clamped to the raster bounds; callers slice with segments
    /// produced by the paginator, which never exceed them.
    pub fn slice(&self, offset_px: u32, height_px: u32) -> RasterBuffer {
        let offset = offset_px.min(self.height());
        let height = height_px.min(self.height() - offset);
        let band = imageops::crop_imm(&self.image, 0, offset, self.width(), height).to_image();
        RasterBuffer::new(band)
    }

    /// Encode as JPEG at the given quality (1-100).
    ///
    /// JPEG data can be embedded in a PDF as-is under the DCTDecode filter,
    /// which keeps page bodies compact without a transcoding step.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, image::ImageError> {
        let mut out = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
        encoder.encode_image(&self.image)?;
        Ok(out)
    }
}
