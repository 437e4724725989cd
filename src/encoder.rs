//! The orchestrator: a document definition in, a complete PDF file out.
//!
//! ## Build pipeline
//!
//! ```text
//! DocumentDefinition
//!     ↓
//! [convert_image]  (header/footer references → JPEG payloads)
//!     ↓
//! [flatten]        (blocks → plain text lines)
//!     ↓
//! [ContentStreamBuilder]  (lines + placements → operators)
//!     ↓
//! [PdfObjectStore] (objects, xref, trailer)
//!     ↓
//! PDF bytes
//! ```
//!
//! Every call owns a fresh [`PdfObjectStore`] and its image buffers
//! exclusively, so concurrent builds share nothing and need no locking.

use crate::content::{ContentStreamBuilder, PAGE_HEIGHT, PAGE_WIDTH};
use crate::definition::DocumentDefinition;
use crate::error::Result;
use crate::flatten::flatten;
use crate::image::{convert_image, EmbeddedRasterHost, ImagePayload, RasterHost};
use crate::store::PdfObjectStore;

/// Resource name of the header image XObject.
const HEADER_IMAGE_NAME: &str = "ImH";
/// Resource name of the footer image XObject.
const FOOTER_IMAGE_NAME: &str = "ImF";

/// Margin between a band image and its page edge, in points.
const BAND_MARGIN: f64 = 20.0;
/// Left edge of the text column, in points.
const TEXT_ORIGIN_X: f64 = 50.0;
/// Vertical cursor start for the first text line, in points.
const TEXT_START_Y: f64 = 700.0;
/// Vertical distance consumed per text line, in points.
const LINE_HEIGHT: f64 = 18.0;
/// Lines that would drop the cursor below this floor are truncated.
const TEXT_FLOOR_Y: f64 = 80.0;
/// Text size of the built-in face, in points.
const FONT_SIZE: f64 = 12.0;

/// Builds single-page PDF documents against a raster host.
pub struct DocumentEncoder<'a> {
    host: &'a dyn RasterHost,
}

impl<'a> DocumentEncoder<'a> {
    /// Create an encoder that resolves image references through `host`.
    pub fn new(host: &'a dyn RasterHost) -> Self {
        Self { host }
    }

    /// Encode a document definition into a complete PDF 1.4 byte buffer.
    ///
    /// Fails only on image decode/re-encode errors; absent images and
    /// overflowing content degrade silently as the layout dictates.
    pub fn encode(&self, doc: &DocumentDefinition) -> Result<Vec<u8>> {
        let mut store = PdfObjectStore::new();
        let font_id = store.add_raw("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");

        let header = convert_image(
            self.host,
            HEADER_IMAGE_NAME,
            doc.header.as_ref().and_then(|band| band.image.as_deref()),
        )?;
        let footer = convert_image(
            self.host,
            FOOTER_IMAGE_NAME,
            doc.footer.as_ref().and_then(|band| band.image.as_deref()),
        )?;

        let mut xobjects: Vec<(String, u32)> = Vec::new();
        for payload in [header.as_ref(), footer.as_ref()].into_iter().flatten() {
            let id = store.add_stream(&image_xobject_dict(payload), &payload.bytes);
            xobjects.push((payload.name.clone(), id));
        }

        let lines = flatten(&doc.content);

        let mut content = ContentStreamBuilder::new();
        if let Some(payload) = header.as_ref() {
            let x = (PAGE_WIDTH - f64::from(payload.width)) / 2.0;
            let y = PAGE_HEIGHT - f64::from(payload.height) - BAND_MARGIN;
            content.draw_image(payload, x, y);
        }
        if let Some(payload) = footer.as_ref() {
            let x = (PAGE_WIDTH - f64::from(payload.width)) / 2.0;
            content.draw_image(payload, x, BAND_MARGIN);
        }

        let mut cursor_y = TEXT_START_Y;
        let mut dropped = 0usize;
        for line in &lines {
            if line.is_empty() {
                continue;
            }
            if cursor_y - LINE_HEIGHT < TEXT_FLOOR_Y {
                dropped += 1;
                continue;
            }
            content.show_text(line, TEXT_ORIGIN_X, cursor_y, FONT_SIZE);
            cursor_y -= LINE_HEIGHT;
        }
        if dropped > 0 {
            log::debug!("content overflow: dropped {} line(s) below the text floor", dropped);
        }

        let content_bytes = content.build()?;
        let content_id =
            store.add_stream(&format!("<< /Length {} >>", content_bytes.len()), &content_bytes);

        let mut resources = format!("/Font << /F1 {} 0 R >>", font_id);
        if !xobjects.is_empty() {
            let entries: Vec<String> = xobjects
                .iter()
                .map(|(name, id)| format!("/{} {} 0 R", name, id))
                .collect();
            resources.push_str(&format!(" /XObject << {} >>", entries.join(" ")));
        }
        let resources = format!("<< {} >>", resources);

        // Page, pages tree, and catalog reference each other, so their ids
        // are reserved first and the bodies patched in afterwards.
        let page_id = store.add_placeholder();
        let pages_id = store.add_placeholder();
        let catalog_id = store.add_placeholder();

        store.update(
            page_id,
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 595 842] /Resources {} /Contents {} 0 R >>",
                pages_id, resources, content_id
            ),
        )?;
        store.update(pages_id, format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", page_id))?;
        store.update(catalog_id, format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id))?;

        log::debug!(
            "encoded document: {} objects, {} text line(s), {} image(s)",
            store.len(),
            lines.len().saturating_sub(dropped),
            xobjects.len()
        );
        store.build(catalog_id)
    }
}

/// Encode a document with the in-process raster host.
pub fn encode_document(doc: &DocumentDefinition) -> Result<Vec<u8>> {
    DocumentEncoder::new(&EmbeddedRasterHost).encode(doc)
}

fn image_xobject_dict(payload: &ImagePayload) -> String {
    format!(
        "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB \
         /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>",
        payload.width,
        payload.height,
        payload.bytes.len()
    )
}
