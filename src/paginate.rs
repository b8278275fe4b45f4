//! Raster pagination.
//!
//! Slices a scaled raster into an ordered sequence of page-sized segments.
//! Each segment maps a horizontal pixel band of the source raster to the
//! rendered height it occupies on one output page.
//!
//! The slicing contract: segments are emitted in strictly increasing offset
//! order, are contiguous, and their pixel heights sum exactly to the source
//! raster height. Interior segments round their pixel height independently;
//! the last segment takes whatever pixels remain, absorbing accumulated
//! rounding drift. That "last segment absorbs the remainder" rule is the
//! canonical contract, not an approximation.

use crate::layout::PageLayout;

/// One vertical slice of the source raster, mapped to one output page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// First source row of this slice, in pixels from the top of the raster
    pub source_offset_px: u32,
    /// Number of source rows in this slice
    pub source_height_px: u32,
    /// Height this slice occupies on its page, in millimeters
    pub rendered_height: f64,
}

impl Segment {
    /// Exclusive end row of this slice.
    pub fn source_end_px(&self) -> u32 {
        self.source_offset_px + self.source_height_px
    }
}

/// Slice a raster of `source_height_px` pixel rows into page-sized segments.
///
/// Single pass, deterministic, bounded by
/// `ceil(scaled_height / usable_height_per_page)` iterations. The returned
/// sequence is never empty: a raster that fits on one page yields exactly one
/// segment spanning the whole raster.
pub fn paginate(layout: &PageLayout, source_height_px: u32) -> Vec<Segment> {
    let usable = layout.usable_height_per_page;

    // Single-page case: the whole raster fits under the header of page one.
    if layout.scaled_height <= usable {
        return vec![Segment {
            source_offset_px: 0,
            source_height_px,
            rendered_height: layout.scaled_height,
        }];
    }

    let mut segments: Vec<Segment> = Vec::with_capacity(layout.page_count());
    let mut remaining_rendered = layout.scaled_height;
    let mut offset_px: u32 = 0;

    while remaining_rendered > 0.0 {
        let slice_rendered = remaining_rendered.min(usable);
        let is_last = remaining_rendered <= usable;
        let remaining_px = source_height_px - offset_px;

        if remaining_px == 0 {
            // Fewer source rows than pages: interior slices consumed the
            // raster early. Fold the leftover rendered height into the
            // previous segment instead of emitting an empty slice.
            if let Some(prev) = segments.last_mut() {
                prev.rendered_height += remaining_rendered;
            }
            break;
        }

        let slice_px = if is_last {
            // Absorb rounding drift: the final slice takes every remaining
            // row exactly, so the pixel heights always sum to the source
            // height with no gap and no double-count.
            remaining_px
        } else {
            let ratio = slice_rendered / layout.scaled_height;
            let rounded = (source_height_px as f64 * ratio).round() as u32;
            // An interior slice covers at least one row and never more than
            // the rows still unassigned.
            rounded.clamp(1, remaining_px)
        };

        segments.push(Segment {
            source_offset_px: offset_px,
            source_height_px: slice_px,
            rendered_height: slice_rendered,
        });

        offset_px += slice_px;
        remaining_rendered -= slice_rendered;
    }

    log::debug!(
        "paginated {} source rows into {} segments",
        source_height_px,
        segments.len()
    );

    segments
}
