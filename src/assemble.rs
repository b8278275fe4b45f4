//! Document assembly.
//!
//! Walks the segment sequence and drives a [`DocumentSink`]: every page gets
//! the same header line (title left-aligned, generation timestamp
//! right-aligned) followed by its segment's slice of the raster, placed at
//! `(margin, header_height)` and sized to the usable width.

use crate::layout::PageLayout;
use crate::page::PageFormat;
use crate::paginate::Segment;
use crate::raster::RasterBuffer;
use crate::sink::{AssemblyError, DocumentSink, TextAlign};

/// Font size for the header title line, in points.
const TITLE_SIZE_PT: f64 = 10.0;
/// Font size for the header timestamp, in points.
const TIMESTAMP_SIZE_PT: f64 = 8.0;
/// Header baseline, in millimeters below the top edge.
const HEADER_BASELINE_MM: f64 = 8.0;

/// Embeds paginated segments into a document with consistent headers and
/// margins.
pub struct DocumentAssembler<'a> {
    format: &'a PageFormat,
    layout: &'a PageLayout,
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler for the given page format and planned layout.
    pub fn new(format: &'a PageFormat, layout: &'a PageLayout) -> Self {
        Self { format, layout }
    }

    /// Assemble all segments into the sink.
    ///
    /// Pages are appended in segment order; a page boundary is inserted
    /// between consecutive segments, never before the first. Assembly is
    /// all-or-nothing: the first failing segment aborts and nothing is
    /// persisted (persisting is the caller's separate `save` step).
    pub fn assemble<S: DocumentSink>(
        &self,
        sink: &mut S,
        raster: &RasterBuffer,
        segments: &[Segment],
        title: &str,
        generated_at: &str,
    ) -> Result<(), AssemblyError> {
        let header_baseline = HEADER_BASELINE_MM.min(self.format.header_height);

        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                sink.new_page()?;
            }

            sink.draw_text(title, self.format.margin, header_baseline, TITLE_SIZE_PT, TextAlign::Left)?;
            sink.draw_text(
                generated_at,
                self.format.page_width - self.format.margin,
                header_baseline,
                TIMESTAMP_SIZE_PT,
                TextAlign::Right,
            )?;

            // The per-segment sub-image lives only for this iteration.
            let band = raster.slice(segment.source_offset_px, segment.source_height_px);
            sink.embed_image(
                &band,
                self.format.margin,
                self.format.header_height,
                self.layout.usable_width,
                segment.rendered_height,
            )?;
        }

        log::debug!("assembled {} pages", segments.len());
        Ok(())
    }
}
