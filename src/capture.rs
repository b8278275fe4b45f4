//! Raster capture service.
//!
//! Capture is environment-bound (a browser rasterizes DOM regions, a
//! headless worker reads pre-rendered images), so the pipeline consumes it
//! through an injectable trait. Capture is the first suspension point of an
//! export call: rasterizing a tall region is I/O- and CPU-bound and may take
//! noticeable wall-clock time.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::raster::RasterBuffer;

/// Error raised by a capture service.
///
/// Never retried: the captured region is static, so the failure is surfaced
/// to the caller with its upstream cause.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The region cannot be rasterized (detached, invisible, cross-origin)
    #[error("region unavailable: {0}")]
    Unavailable(String),

    /// Reading the region's backing source failed
    #[error("failed to read region source: {0}")]
    Io(#[from] std::io::Error),

    /// The captured bytes are not a decodable image
    #[error("failed to decode captured image: {0}")]
    Decode(String),
}

/// Converts a visual region into a [`RasterBuffer`].
#[async_trait]
pub trait RasterCaptureService: Send + Sync {
    /// Handle identifying a capturable region.
    type Region: Send + Sync;

    /// Rasterize the region.
    async fn capture(&self, region: &Self::Region) -> Result<RasterBuffer, CaptureError>;
}

/// Headless capture service that treats image files as regions.
///
/// Substitutes for a browser rasterizer in server-side and test
/// environments: the "region" is a path to a pre-rendered PNG or JPEG.
#[derive(Debug, Default)]
pub struct FileCapture;

impl FileCapture {
    /// Create a new file-backed capture service.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RasterCaptureService for FileCapture {
    type Region = PathBuf;

    async fn capture(&self, region: &PathBuf) -> Result<RasterBuffer, CaptureError> {
        let bytes = tokio::fs::read(region).await?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;
        let raster = RasterBuffer::from_dynamic(decoded);
        log::debug!(
            "captured {}x{} raster from {}",
            raster.width(),
            raster.height(),
            region.display()
        );
        Ok(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_capture_missing_file() {
        let capture = FileCapture::new();
        let err = capture
            .capture(&PathBuf::from("/nonexistent/region.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CaptureError::Io(_)));
    }

    #[tokio::test]
    async fn test_file_capture_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"plain text").unwrap();

        let capture = FileCapture::new();
        let err = capture.capture(&path).await.unwrap_err();
        assert!(matches!(err, CaptureError::Decode(_)));
    }

    #[tokio::test]
    async fn test_file_capture_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("region.png");
        let image = image::RgbImage::from_pixel(12, 34, image::Rgb([200, 10, 10]));
        image.save(&path).unwrap();

        let capture = FileCapture::new();
        let raster = capture.capture(&path).await.unwrap();
        assert_eq!(raster.width(), 12);
        assert_eq!(raster.height(), 34);
    }
}
