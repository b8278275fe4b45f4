//! Document sink.
//!
//! The document writer is the second injectable collaborator of the
//! pipeline: the assembler feeds it pages and images, and `save` serializes
//! the finished document exactly once. Any engine that can place an image
//! and a line of text on a page can implement it; the crate ships
//! [`PdfSink`](crate::pdf::PdfSink) as the production implementation.
//!
//! Coordinates passed to a sink are millimeters from the top-left corner of
//! the current page; implementations convert to their native space.

use async_trait::async_trait;

use crate::raster::RasterBuffer;

/// Error raised while assembling or persisting a document.
///
/// Assembly is all-or-nothing: any of these aborts the export and no
/// partial document is written.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// Encoding a page body image for embedding failed
    #[error("failed to encode page image: {0}")]
    ImageEncode(String),

    /// The sink rejected an embed or draw operation
    #[error("failed to embed content: {0}")]
    Embed(String),

    /// Serializing or writing the finished document failed
    #[error("failed to persist document: {0}")]
    Persist(String),
}

/// Horizontal text alignment for header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Anchor the text's left edge at the given x
    #[default]
    Left,
    /// Anchor the text's right edge at the given x
    Right,
}

/// Accepts page-sized images and persists a multi-page document.
///
/// A sink starts with its first page already open; the assembler calls
/// [`new_page`](DocumentSink::new_page) only between consecutive segments,
/// never before the first.
#[async_trait]
pub trait DocumentSink: Send {
    /// Start a new page after the current one.
    fn new_page(&mut self) -> Result<(), AssemblyError>;

    /// Place an image on the current page.
    ///
    /// `x`/`y` position the image's top-left corner; `w`/`h` are the
    /// rendered size. All in millimeters.
    fn embed_image(
        &mut self,
        image: &RasterBuffer,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<(), AssemblyError>;

    /// Draw a single line of text on the current page.
    ///
    /// `x`/`y` anchor the text baseline per `align`; `size_pt` is the font
    /// size in points.
    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        size_pt: f64,
        align: TextAlign,
    ) -> Result<(), AssemblyError>;

    /// Serialize the document and write it under `filename`.
    ///
    /// Consumes the sink: a document is terminal output, serialized once and
    /// never mutated afterwards.
    async fn save(self, filename: &str) -> Result<(), AssemblyError>;
}
