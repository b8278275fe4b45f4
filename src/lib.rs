//! # snapdoc
//!
//! Paginated PDF export for captured raster snapshots.
//!
//! snapdoc converts an arbitrarily tall captured image into a correctly
//! paginated multi-page PDF: pixel continuity is preserved across page
//! boundaries and no content is duplicated, skipped, or distorted. The
//! pagination core guarantees that the per-page pixel bands sum exactly to
//! the source raster, with the final page absorbing all rounding drift.
//!
//! ## Pipeline
//!
//! ```text
//! RasterCaptureService (injected)
//!     ↓ RasterBuffer
//! PageLayout::plan          (scale, usable area per page)
//!     ↓
//! paginate                  (ordered, contiguous Segments)
//!     ↓
//! DocumentAssembler         (header + body per page)
//!     ↓
//! DocumentSink (injected)   → saved document
//! ```
//!
//! Capture and save are async suspension points; planning, slicing, and
//! assembly run synchronously in between.
//!
//! ## Quick start
//!
//! ```ignore
//! use snapdoc::{Exporter, FileCapture, PageFormat, PdfSink};
//!
//! # async fn demo() -> snapdoc::Result<()> {
//! let exporter = Exporter::new(FileCapture::new());
//! let sink = PdfSink::new(PageFormat::a4());
//! exporter
//!     .export_single(&"dashboard.png".into(), sink, "Underwriting Dashboard", "dashboard.pdf")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Both collaborators are injectable traits ([`RasterCaptureService`],
//! [`DocumentSink`]), so any platform can substitute its own rasterizer and
//! document writer; [`FileCapture`] and [`PdfSink`] are the bundled
//! headless implementations.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Pagination core
pub mod layout;
pub mod page;
pub mod paginate;

// Raster buffers and capture
pub mod capture;
pub mod raster;

// Document output
pub mod assemble;
pub mod object;
pub mod pdf;
pub mod sink;

// Orchestration
pub mod export;

// Saved report library
pub mod store;

// Re-exports
pub use assemble::DocumentAssembler;
pub use capture::{CaptureError, FileCapture, RasterCaptureService};
pub use error::{Error, Result};
pub use export::Exporter;
pub use layout::{LayoutError, PageLayout};
pub use page::PageFormat;
pub use paginate::{paginate, Segment};
pub use pdf::{PdfSink, PdfSinkConfig};
pub use raster::RasterBuffer;
pub use sink::{AssemblyError, DocumentSink, TextAlign};
pub use store::{JsonFileStore, ReportStore, SavedReport};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
