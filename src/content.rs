//! Content stream building: page-space drawing and text operators.
//!
//! The builder collects typed operations and renders them into the byte
//! sequence of a PDF content stream, one operation per line. Only the two
//! operator shapes the page layout needs exist: painting an image XObject
//! under a transformation matrix, and showing one line of text in the
//! built-in face.

use std::io::Write;

use crate::error::Result;
use crate::image::ImagePayload;

/// Page width in points (A4 portrait).
pub const PAGE_WIDTH: f64 = 595.0;
/// Page height in points (A4 portrait).
pub const PAGE_HEIGHT: f64 = 842.0;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone)]
enum ContentOp {
    /// Paint an image XObject: `q w 0 0 h x y cm /Name Do Q`
    DrawImage {
        name: String,
        width: u32,
        height: u32,
        x: f64,
        y: f64,
    },
    /// Show one line of text: `BT /F1 size Tf 1 0 0 1 x y Tm (text) Tj ET`
    ShowText { text: String, x: f64, y: f64, size: f64 },
}

/// Builder for the page content stream.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentOp>,
}

impl ContentStreamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations recorded so far.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Paint an image payload with its lower-left corner at `(x, y)`.
    pub fn draw_image(&mut self, payload: &ImagePayload, x: f64, y: f64) -> &mut Self {
        self.operations.push(ContentOp::DrawImage {
            name: payload.name.clone(),
            width: payload.width,
            height: payload.height,
            x,
            y,
        });
        self
    }

    /// Show one line of text at `(x, y)` in the built-in face.
    pub fn show_text(&mut self, text: &str, x: f64, y: f64, size: f64) -> &mut Self {
        self.operations.push(ContentOp::ShowText {
            text: text.to_string(),
            x,
            y,
            size,
        });
        self
    }

    /// Render the collected operations into content stream bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for (index, op) in self.operations.iter().enumerate() {
            if index > 0 {
                out.push(b'\n');
            }
            match op {
                ContentOp::DrawImage {
                    name,
                    width,
                    height,
                    x,
                    y,
                } => {
                    write!(out, "q {} 0 0 {} {:.2} {:.2} cm /{} Do Q", width, height, x, y, name)?;
                },
                ContentOp::ShowText { text, x, y, size } => {
                    write!(
                        out,
                        "BT /F1 {} Tf 1 0 0 1 {} {:.2} Tm ({}) Tj ET",
                        size,
                        x,
                        y,
                        escape_text(text)
                    )?;
                },
            }
        }
        Ok(out)
    }
}

/// Escape a string for a PDF literal: `\`, `(`, and `)` each get a
/// preceding backslash.
///
/// Single-pass by design: applying it to already-escaped text escapes the
/// introduced backslashes again, so it is used exactly once per string.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '(' => escaped.push_str("\\("),
            ')' => escaped.push_str("\\)"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
