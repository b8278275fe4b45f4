//! PDF document sink.
//!
//! A minimal PDF writer specialized for paginated raster export: pages carry
//! one JPEG image XObject (embedded as-is under DCTDecode) plus a Helvetica
//! header line. Emits a complete document with catalog, page tree, xref
//! table, and trailer; content streams are Flate-compressed.

use std::collections::HashMap;
use std::io::Write;

use async_trait::async_trait;
use bytes::Bytes;

use crate::object::Object;
use crate::page::{PageFormat, PT_PER_MM};
use crate::raster::RasterBuffer;
use crate::sink::{AssemblyError, DocumentSink, TextAlign};

/// Configuration for PDF output.
#[derive(Debug, Clone)]
pub struct PdfSinkConfig {
    /// PDF version written to the header
    pub version: String,
    /// Document title for the Info dictionary
    pub title: Option<String>,
    /// Creator application for the Info dictionary
    pub creator: Option<String>,
    /// JPEG quality for embedded page bodies (1-100)
    pub jpeg_quality: u8,
    /// Compress page content streams with FlateDecode
    pub compress: bool,
}

impl Default for PdfSinkConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some("snapdoc".to_string()),
            jpeg_quality: 85,
            compress: true,
        }
    }
}

impl PdfSinkConfig {
    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the JPEG quality for embedded images.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }
}

/// Approximate Helvetica advance width as a proportion of font size.
///
/// Good enough to right-align a short header line; exact metrics would need
/// an AFM table.
const CHAR_WIDTH_RATIO: f64 = 0.5;

/// A JPEG image XObject pending serialization.
struct PendingImage {
    resource_id: String,
    width: u32,
    height: u32,
    jpeg: Vec<u8>,
}

/// One page under construction: its content stream operators and the
/// images it references.
struct PdfPage {
    content: Vec<u8>,
    images: Vec<PendingImage>,
}

impl PdfPage {
    fn new() -> Self {
        Self {
            content: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// [`DocumentSink`] that writes a multi-page PDF.
///
/// Created with its first page already open, per the sink contract.
pub struct PdfSink {
    format: PageFormat,
    config: PdfSinkConfig,
    pages: Vec<PdfPage>,
    next_image_id: u32,
}

impl PdfSink {
    /// Create a sink producing pages of the given format.
    pub fn new(format: PageFormat) -> Self {
        Self::with_config(format, PdfSinkConfig::default())
    }

    /// Create a sink with custom output configuration.
    pub fn with_config(format: PageFormat, config: PdfSinkConfig) -> Self {
        Self {
            format,
            config,
            pages: vec![PdfPage::new()],
            next_image_id: 1,
        }
    }

    fn current_page(&mut self) -> &mut PdfPage {
        // Invariant: pages is never empty.
        self.pages.last_mut().unwrap()
    }

    /// Serialize the complete document.
    ///
    /// All-or-nothing: any failure discards the output, nothing partial
    /// escapes this method.
    pub fn finish(self) -> Result<Vec<u8>, AssemblyError> {
        let (page_w_pt, page_h_pt) = self.format.dimensions_pt();
        let mut output = Vec::new();
        let mut xref_offsets: Vec<(u32, usize)> = Vec::new();
        let mut next_obj_id: u32 = 1;
        let mut alloc = || {
            let id = next_obj_id;
            next_obj_id += 1;
            id
        };

        writeln!(output, "%PDF-{}", self.config.version).map_err(io_persist)?;
        // Binary marker so transfer agents treat the file as binary.
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_id = alloc();
        let pages_id = alloc();
        let font_id = alloc();

        // Pre-allocate page, content, and image object ids so references can
        // be emitted before the objects themselves.
        let mut page_ids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let page_id = alloc();
            let content_id = alloc();
            let image_ids: Vec<u32> = page.images.iter().map(|_| alloc()).collect();
            page_ids.push((page_id, content_id, image_ids));
        }
        let info_id = alloc();
        let total_objects = next_obj_id;

        let mut emit = |output: &mut Vec<u8>, xref: &mut Vec<(u32, usize)>, id: u32, obj: &Object| {
            xref.push((id, output.len()));
            output.extend_from_slice(&obj.to_indirect_bytes(id, 0));
        };

        // Catalog and page tree.
        let page_refs: Vec<Object> = page_ids
            .iter()
            .map(|(page_id, _, _)| Object::reference(*page_id, 0))
            .collect();
        emit(
            &mut output,
            &mut xref_offsets,
            catalog_id,
            &Object::dict(vec![
                ("Type", Object::name("Catalog")),
                ("Pages", Object::reference(pages_id, 0)),
            ]),
        );
        emit(
            &mut output,
            &mut xref_offsets,
            pages_id,
            &Object::dict(vec![
                ("Type", Object::name("Pages")),
                ("Kids", Object::Array(page_refs)),
                ("Count", Object::Integer(self.pages.len() as i64)),
            ]),
        );

        // Single header font shared by all pages.
        emit(
            &mut output,
            &mut xref_offsets,
            font_id,
            &Object::dict(vec![
                ("Type", Object::name("Font")),
                ("Subtype", Object::name("Type1")),
                ("BaseFont", Object::name("Helvetica")),
                ("Encoding", Object::name("WinAnsiEncoding")),
            ]),
        );

        for (page, (page_id, content_id, image_ids)) in self.pages.iter().zip(&page_ids) {
            let xobjects: HashMap<String, Object> = page
                .images
                .iter()
                .zip(image_ids)
                .map(|(img, id)| (img.resource_id.clone(), Object::reference(*id, 0)))
                .collect();

            let resources = Object::dict(vec![
                (
                    "Font",
                    Object::dict(vec![("F1", Object::reference(font_id, 0))]),
                ),
                ("XObject", Object::Dictionary(xobjects)),
            ]);

            emit(
                &mut output,
                &mut xref_offsets,
                *page_id,
                &Object::dict(vec![
                    ("Type", Object::name("Page")),
                    ("Parent", Object::reference(pages_id, 0)),
                    ("MediaBox", Object::rect(0.0, 0.0, page_w_pt, page_h_pt)),
                    ("Contents", Object::reference(*content_id, 0)),
                    ("Resources", resources),
                ]),
            );

            // Content stream, optionally Flate-compressed.
            let mut content_dict = HashMap::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), Object::name("FlateDecode"));
                compress(&page.content).map_err(io_persist)?
            } else {
                page.content.clone()
            };
            emit(
                &mut output,
                &mut xref_offsets,
                *content_id,
                &Object::Stream {
                    dict: content_dict,
                    data: Bytes::from(content_bytes),
                },
            );

            // Image XObjects: JPEG data passes through under DCTDecode.
            for (img, id) in page.images.iter().zip(image_ids) {
                let mut dict = HashMap::new();
                dict.insert("Type".to_string(), Object::name("XObject"));
                dict.insert("Subtype".to_string(), Object::name("Image"));
                dict.insert("Width".to_string(), Object::Integer(img.width as i64));
                dict.insert("Height".to_string(), Object::Integer(img.height as i64));
                dict.insert("ColorSpace".to_string(), Object::name("DeviceRGB"));
                dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
                dict.insert("Filter".to_string(), Object::name("DCTDecode"));
                emit(
                    &mut output,
                    &mut xref_offsets,
                    *id,
                    &Object::Stream {
                        dict,
                        data: Bytes::from(img.jpeg.clone()),
                    },
                );
            }
        }

        // Info dictionary.
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", Object::string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", Object::string(creator)));
        }
        let creation_date = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
        info_entries.push(("CreationDate", Object::string(&creation_date)));
        emit(&mut output, &mut xref_offsets, info_id, &Object::dict(info_entries));

        // Cross-reference table and trailer.
        let xref_start = output.len();
        writeln!(output, "xref").map_err(io_persist)?;
        writeln!(output, "0 {}", total_objects).map_err(io_persist)?;
        writeln!(output, "0000000000 65535 f ").map_err(io_persist)?;
        xref_offsets.sort_by_key(|(id, _)| *id);
        for (_, offset) in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset).map_err(io_persist)?;
        }

        let trailer = Object::dict(vec![
            ("Size", Object::Integer(total_objects as i64)),
            ("Root", Object::reference(catalog_id, 0)),
            ("Info", Object::reference(info_id, 0)),
        ]);
        writeln!(output, "trailer").map_err(io_persist)?;
        output.extend_from_slice(&trailer.to_bytes());
        writeln!(output).map_err(io_persist)?;
        writeln!(output, "startxref").map_err(io_persist)?;
        writeln!(output, "{}", xref_start).map_err(io_persist)?;
        write!(output, "%%EOF").map_err(io_persist)?;

        Ok(output)
    }
}

fn io_persist(e: std::io::Error) -> AssemblyError {
    AssemblyError::Persist(e.to_string())
}

fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Escape a text line for a PDF literal string.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            // Header lines are single-line; fold control chars to spaces.
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

#[async_trait]
impl DocumentSink for PdfSink {
    fn new_page(&mut self) -> Result<(), AssemblyError> {
        self.pages.push(PdfPage::new());
        Ok(())
    }

    fn embed_image(
        &mut self,
        image: &RasterBuffer,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<(), AssemblyError> {
        let jpeg = image
            .encode_jpeg(self.config.jpeg_quality)
            .map_err(|e| AssemblyError::ImageEncode(e.to_string()))?;

        let resource_id = format!("Im{}", self.next_image_id);
        self.next_image_id += 1;

        // Convert top-left millimeter coordinates to bottom-left points.
        let page_h_pt = self.format.page_height * PT_PER_MM;
        let x_pt = x * PT_PER_MM;
        let w_pt = w * PT_PER_MM;
        let h_pt = h * PT_PER_MM;
        let y_pt = page_h_pt - (y * PT_PER_MM) - h_pt;

        let pending = PendingImage {
            resource_id: resource_id.clone(),
            width: image.width(),
            height: image.height(),
            jpeg,
        };
        let page = self.current_page();
        writeln!(
            page.content,
            "q\n{:.4} 0 0 {:.4} {:.4} {:.4} cm\n/{} Do\nQ",
            w_pt, h_pt, x_pt, y_pt, resource_id
        )
        .map_err(|e| AssemblyError::Embed(e.to_string()))?;
        page.images.push(pending);
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        size_pt: f64,
        align: TextAlign,
    ) -> Result<(), AssemblyError> {
        let page_h_pt = self.format.page_height * PT_PER_MM;
        let mut x_pt = x * PT_PER_MM;
        let y_pt = page_h_pt - y * PT_PER_MM;

        if align == TextAlign::Right {
            let width = text.chars().count() as f64 * size_pt * CHAR_WIDTH_RATIO;
            x_pt -= width;
        }

        let escaped = escape_text(text);
        let page = self.current_page();
        writeln!(
            page.content,
            "BT\n/F1 {:.2} Tf\n{:.4} {:.4} Td\n({}) Tj\nET",
            size_pt, x_pt, y_pt, escaped
        )
        .map_err(|e| AssemblyError::Embed(e.to_string()))?;
        Ok(())
    }

    async fn save(self, filename: &str) -> Result<(), AssemblyError> {
        let page_count = self.pages.len();
        let bytes = self.finish()?;
        tokio::fs::write(filename, &bytes)
            .await
            .map_err(|e| AssemblyError::Persist(e.to_string()))?;
        log::info!("saved {} page PDF ({} bytes) to {}", page_count, bytes.len(), filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn test_raster(w: u32, h: u32) -> RasterBuffer {
        RasterBuffer::new(RgbImage::from_pixel(w, h, Rgb([120, 130, 140])))
    }

    fn uncompressed_sink() -> PdfSink {
        let config = PdfSinkConfig {
            compress: false,
            ..PdfSinkConfig::default()
        };
        PdfSink::with_config(PageFormat::a4(), config)
    }

    #[test]
    fn test_empty_document_structure() {
        let sink = PdfSink::new(PageFormat::a4());
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Count 1")); // first page is open from the start
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_new_page_increments_count() {
        let mut sink = PdfSink::new(PageFormat::a4());
        sink.new_page().unwrap();
        sink.new_page().unwrap();
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 3"));
    }

    #[test]
    fn test_embed_image_emits_xobject() {
        let mut sink = uncompressed_sink();
        sink.embed_image(&test_raster(50, 40), 10.0, 12.0, 190.0, 152.0).unwrap();
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Subtype /Image"));
        assert!(content.contains("/Filter /DCTDecode"));
        assert!(content.contains("/Im1 Do"));
        assert!(content.contains("/Width 50"));
        assert!(content.contains("/Height 40"));
    }

    #[test]
    fn test_draw_text_emits_text_object() {
        let mut sink = uncompressed_sink();
        sink.draw_text("Claims Report", 10.0, 8.0, 10.0, TextAlign::Left).unwrap();
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("(Claims Report) Tj"));
        assert!(content.contains("/BaseFont /Helvetica"));
    }

    #[test]
    fn test_text_parentheses_escaped() {
        let mut sink = uncompressed_sink();
        sink.draw_text("Report (draft)", 10.0, 8.0, 10.0, TextAlign::Left).unwrap();
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("(Report \\(draft\\)) Tj"));
    }

    #[test]
    fn test_right_aligned_text_shifts_left() {
        let mut sink = uncompressed_sink();
        sink.draw_text("x", 200.0, 8.0, 10.0, TextAlign::Right).unwrap();
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        // 200mm = 566.93pt, minus one 5pt approximated advance.
        assert!(content.contains("561.9"));
    }

    #[test]
    fn test_media_box_matches_format() {
        let sink = PdfSink::new(PageFormat::custom(100.0, 200.0, 10.0, 10.0));
        let bytes = sink.finish().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        // 100mm x 200mm in points.
        assert!(content.contains("[0 0 283.46457 566.92913]"));
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let sink = PdfSink::new(PageFormat::a4());
        sink.save(path.to_str().unwrap()).await.unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }
}
