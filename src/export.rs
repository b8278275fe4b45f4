//! Export orchestration.
//!
//! Drives the full pipeline for one captured region: capture, layout
//! planning, pagination, assembly, save. The call suspends at the capture
//! step and again at the final save; everything in between is synchronous,
//! so the raster is never observed half-sliced by another task. Concurrent
//! exports are independent and share no mutable state.
//!
//! There are no retries and no partial recovery: a paginated document that
//! skipped a failed segment would misrepresent the source content, so the
//! first failure aborts the export.

use crate::assemble::DocumentAssembler;
use crate::capture::RasterCaptureService;
use crate::error::Result;
use crate::layout::PageLayout;
use crate::page::PageFormat;
use crate::paginate::paginate;
use crate::sink::DocumentSink;

/// Timestamp shown in every page header.
const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Timestamp qualifying generated filenames.
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Orchestrates paginated exports over an injected capture service.
pub struct Exporter<C> {
    capture: C,
    format: PageFormat,
}

impl<C: RasterCaptureService> Exporter<C> {
    /// Create an exporter with the default page format (portrait A4).
    pub fn new(capture: C) -> Self {
        Self::with_format(capture, PageFormat::default())
    }

    /// Create an exporter producing pages of the given format.
    pub fn with_format(capture: C, format: PageFormat) -> Self {
        Self { capture, format }
    }

    /// The page format this exporter produces.
    pub fn format(&self) -> &PageFormat {
        &self.format
    }

    /// Export one visual region as a paginated document under
    /// a caller-supplied filename.
    pub async fn export_single<S: DocumentSink>(
        &self,
        region: &C::Region,
        sink: S,
        title: &str,
        filename: &str,
    ) -> Result<()> {
        self.run(region, sink, title, filename).await
    }

    /// Export a container region holding multiple logical items.
    ///
    /// Identical pipeline to [`export_single`](Exporter::export_single): the
    /// container's total rendered height may span many pages, top-to-bottom
    /// in the container's visual order. When `filename` is `None` a
    /// timestamp-qualified name is generated from the title. Returns the
    /// filename the document was saved under.
    pub async fn export_batch<S: DocumentSink>(
        &self,
        container: &C::Region,
        sink: S,
        title: &str,
        filename: Option<&str>,
    ) -> Result<String> {
        let filename = match filename {
            Some(name) => name.to_string(),
            None => generated_filename(title),
        };
        self.run(container, sink, title, &filename).await?;
        Ok(filename)
    }

    async fn run<S: DocumentSink>(
        &self,
        region: &C::Region,
        mut sink: S,
        title: &str,
        filename: &str,
    ) -> Result<()> {
        log::info!("exporting '{}' to {}", title, filename);

        // Suspension point one: rasterizing the region.
        let raster = self.capture.capture(region).await?;

        let layout = PageLayout::plan(raster.width(), raster.height(), &self.format)?;
        let segments = paginate(&layout, raster.height());
        log::info!(
            "{}x{} raster paginated into {} pages",
            raster.width(),
            raster.height(),
            segments.len()
        );

        let generated_at = chrono::Local::now().format(HEADER_TIMESTAMP_FORMAT).to_string();
        DocumentAssembler::new(&self.format, &layout)
            .assemble(&mut sink, &raster, &segments, title, &generated_at)?;

        // The raster and its per-segment slices are dropped here; only the
        // assembled document crosses the final suspension point.
        drop(raster);

        // Suspension point two: serializing and persisting the document.
        sink.save(filename).await?;
        Ok(())
    }
}

/// Build a `{slug}-{timestamp}.pdf` filename from a document title.
fn generated_filename(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "export" } else { slug };
    let stamp = chrono::Local::now().format(FILENAME_TIMESTAMP_FORMAT);
    format!("{}-{}.pdf", slug, stamp)
}
