//! Error types for the export engine.
//!
//! Each pipeline stage defines its own error enum next to the code that
//! produces it; this module unifies them for callers that drive the whole
//! pipeline.

use crate::capture::CaptureError;
use crate::layout::LayoutError;
use crate::sink::AssemblyError;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during a paginated export.
///
/// None of these is retried automatically: the inputs (a static captured
/// raster) do not change between attempts, so a failed export is surfaced
/// to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Degenerate raster dimensions or page geometry
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Upstream capture failure (reported with its cause, never retried)
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Embedding or persistence failure mid-document (no partial file is written)
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
