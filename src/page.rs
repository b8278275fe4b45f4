//! Page geometry for the output document.
//!
//! All lengths are millimeters. A `PageFormat` reserves a uniform margin on
//! all four sides plus a header band at the top of every page; everything
//! inside that frame is usable body area.

use serde::{Deserialize, Serialize};

/// Points per millimeter (PDF user space is 72 points per inch).
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// Output page geometry in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFormat {
    /// Page width
    pub page_width: f64,
    /// Page height
    pub page_height: f64,
    /// Margin applied on all four sides
    pub margin: f64,
    /// Header band reserved at the top of every page
    pub header_height: f64,
}

impl PageFormat {
    /// Portrait A4 (210mm x 297mm) with a 10mm margin and 12mm header band.
    pub fn a4() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            header_height: 12.0,
        }
    }

    /// Portrait US Letter (215.9mm x 279.4mm) with the same frame as [`PageFormat::a4`].
    pub fn letter() -> Self {
        Self {
            page_width: 215.9,
            page_height: 279.4,
            margin: 10.0,
            header_height: 12.0,
        }
    }

    /// Custom page dimensions with an explicit margin and header band.
    pub fn custom(page_width: f64, page_height: f64, margin: f64, header_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            margin,
            header_height,
        }
    }

    /// Width remaining after the left and right margins.
    pub fn usable_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Height remaining after the bottom margin and the header band.
    ///
    /// First and subsequent pages use the same usable height, which keeps
    /// the pagination loop uniform across the document.
    pub fn usable_height(&self) -> f64 {
        self.page_height - self.margin - self.header_height
    }

    /// Page dimensions in PDF points.
    pub fn dimensions_pt(&self) -> (f64, f64) {
        (self.page_width * PT_PER_MM, self.page_height * PT_PER_MM)
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        Self::a4()
    }
}
