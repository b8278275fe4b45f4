//! Page layout planning.
//!
//! Derives the geometry of the output document from a raster's pixel
//! dimensions and a target [`PageFormat`]: the scale factor that makes the
//! raster fill the usable width, the resulting rendered height, and how much
//! of that height fits on each page.

use crate::page::PageFormat;

/// Error for degenerate raster dimensions or page geometry.
///
/// Layout errors are reported immediately and never retried: the inputs are
/// static, so a second attempt would fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Raster has a non-positive width or height
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidRaster {
        /// Raster width in pixels
        width: i64,
        /// Raster height in pixels
        height: i64,
    },

    /// Page format leaves no usable area after margins and header
    #[error("degenerate page format: usable area {usable_width:.2}x{usable_height:.2}mm")]
    DegenerateFormat {
        /// Usable width in millimeters
        usable_width: f64,
        /// Usable height per page in millimeters
        usable_height: f64,
    },
}

/// Planned geometry for rendering one raster into a paginated document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Millimeters of rendered output per source pixel
    pub scale: f64,
    /// Total rendered height of the raster at `scale`, in millimeters
    pub scaled_height: f64,
    /// Rendered width, identical on every page
    pub usable_width: f64,
    /// Rendered height available for the body on each page
    pub usable_height_per_page: f64,
}

impl PageLayout {
    /// Plan the layout for a raster of `raster_width` x `raster_height`
    /// pixels on pages of the given format.
    ///
    /// The raster always fills the usable width; the height is scaled by the
    /// same factor, preserving aspect ratio.
    pub fn plan(raster_width: u32, raster_height: u32, format: &PageFormat) -> Result<Self, LayoutError> {
        if raster_width == 0 || raster_height == 0 {
            return Err(LayoutError::InvalidRaster {
                width: raster_width as i64,
                height: raster_height as i64,
            });
        }

        let usable_width = format.usable_width();
        let usable_height_per_page = format.usable_height();
        if usable_width <= 0.0 || usable_height_per_page <= 0.0 {
            return Err(LayoutError::DegenerateFormat {
                usable_width,
                usable_height: usable_height_per_page,
            });
        }

        let scale = usable_width / raster_width as f64;
        let scaled_height = raster_height as f64 * scale;

        log::debug!(
            "planned layout: scale {:.4}, scaled height {:.2}mm, {:.2}mm usable per page",
            scale,
            scaled_height,
            usable_height_per_page
        );

        Ok(Self {
            scale,
            scaled_height,
            usable_width,
            usable_height_per_page,
        })
    }

    /// Number of pages the raster will occupy.
    pub fn page_count(&self) -> usize {
        (self.scaled_height / self.usable_height_per_page).ceil().max(1.0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_format(usable_width: f64, usable_height: f64) -> PageFormat {
        // Zero margin and header so usable dimensions equal page dimensions.
        PageFormat::custom(usable_width, usable_height, 0.0, 0.0)
    }

    #[test]
    fn test_plan_unit_scale() {
        let layout = PageLayout::plan(1000, 3000, &unit_format(1000.0, 1800.0)).unwrap();
        assert!((layout.scale - 1.0).abs() < 1e-9);
        assert!((layout.scaled_height - 3000.0).abs() < 1e-9);
        assert!((layout.usable_width - 1000.0).abs() < 1e-9);
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn test_plan_scales_height_with_width() {
        let layout = PageLayout::plan(2000, 1000, &unit_format(1000.0, 1800.0)).unwrap();
        assert!((layout.scale - 0.5).abs() < 1e-9);
        assert!((layout.scaled_height - 500.0).abs() < 1e-9);
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn test_plan_rejects_zero_width_raster() {
        let err = PageLayout::plan(0, 500, &PageFormat::a4()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRaster { width: 0, height: 500 }));
    }

    #[test]
    fn test_plan_rejects_zero_height_raster() {
        let err = PageLayout::plan(800, 0, &PageFormat::a4()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidRaster { .. }));
    }

    #[test]
    fn test_plan_rejects_margin_wider_than_page() {
        let format = PageFormat::custom(100.0, 200.0, 60.0, 10.0);
        let err = PageLayout::plan(800, 600, &format).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateFormat { .. }));
    }

    #[test]
    fn test_plan_rejects_header_taller_than_page() {
        let format = PageFormat::custom(100.0, 50.0, 10.0, 45.0);
        let err = PageLayout::plan(800, 600, &format).unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateFormat { .. }));
    }

    #[test]
    fn test_page_count_exact_multiple() {
        let layout = PageLayout::plan(1000, 3600, &unit_format(1000.0, 1800.0)).unwrap();
        assert_eq!(layout.page_count(), 2);
    }
}
