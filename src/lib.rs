//! # pdf_slate
//!
//! A from-scratch single-page PDF encoder for dashboard document exports.
//!
//! Given a [`DocumentDefinition`] (optional header/footer raster bands plus
//! a sequence of text, column, and table blocks), the encoder produces a
//! syntactically valid PDF 1.4 byte buffer with no PDF-writing library
//! underneath: indirect object numbering, forward references patched in
//! placeholder slots, stream objects, a cross-reference table with exact
//! byte offsets, and raster embedding via JPEG re-encoding.
//!
//! ## Architecture
//!
//! ```text
//! DocumentDefinition
//!     ↓
//! [flatten]               (blocks → ordered text lines)
//! [convert_image]         (image references → JPEG payloads)
//!     ↓
//! [ContentStreamBuilder]  (lines + placements → page operators)
//!     ↓
//! [PdfObjectStore]        (objects → header, xref table, trailer)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use pdf_slate::{encode_document, Block, DocumentDefinition};
//!
//! # fn main() -> pdf_slate::Result<()> {
//! let doc = DocumentDefinition::new([Block::text("Hello")]);
//! let bytes = encode_document(&doc)?;
//! assert_eq!(&bytes[..9], b"%PDF-1.4\n");
//! # Ok(())
//! # }
//! ```
//!
//! Whether image references can be rasterized depends on the environment;
//! pass a [`RasterHost`] to [`DocumentEncoder`] to control that, or use
//! [`export_to_file`] for the save-and-report-errors wrapper the dashboard
//! uses.
//!
//! ## Scope
//!
//! One page, one built-in text face, lossy truncation of overflowing
//! content. No vector graphics, no font embedding, no multi-page flow.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Input model
pub mod definition;

// Build pipeline, leaves first
pub mod content;
pub mod flatten;
pub mod image;
pub mod store;

// Orchestration
pub mod encoder;
pub mod export;

// Dashboard payload mapping
pub mod invoice;

// Re-exports
pub use content::{escape_text, ContentStreamBuilder, PAGE_HEIGHT, PAGE_WIDTH};
pub use definition::{
    Block, Cell, Column, ColumnsBlock, DocumentDefinition, PageBand, TableBlock, TableRows,
    TextBlock, TextValue,
};
pub use encoder::{encode_document, DocumentEncoder};
pub use error::{Error, Result};
pub use export::export_to_file;
pub use flatten::flatten;
pub use self::image::{
    convert_image, EmbeddedRasterHost, HeadlessRasterHost, ImagePayload, RasterCapability,
    RasterHost, MAX_IMAGE_WIDTH,
};
pub use invoice::{currency, invoice_document, InvoiceItem, InvoicePdfData};
pub use store::{ObjectBody, PdfObject, PdfObjectStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_slate");
    }
}
