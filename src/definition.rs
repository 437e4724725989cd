//! The document definition model consumed by the encoder.
//!
//! A [`DocumentDefinition`] is the caller-supplied description of what to
//! render: optional header/footer raster bands plus an ordered sequence of
//! content blocks. Blocks form a closed tagged union (text, column groups,
//! tables); the serde representation is `untagged` and tries variants in the
//! same order the dashboard's duck-typed JSON was historically probed, so
//! definitions deserialize directly from that wire shape. Styling extras
//! (margins, widths, alignment) are accepted and ignored.

use serde::de::IgnoredAny;
use serde::Deserialize;

/// A complete single-page document description.
///
/// Read-only to the encoder: one definition may be encoded any number of
/// times, concurrently or not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentDefinition {
    /// Header band, drawn centered near the top edge of the page.
    #[serde(default)]
    pub header: Option<PageBand>,
    /// Footer band, drawn centered near the bottom edge of the page.
    #[serde(default)]
    pub footer: Option<PageBand>,
    /// Ordered content blocks. `None` entries (JSON `null`) are skipped.
    #[serde(default)]
    pub content: Vec<Option<Block>>,
}

impl DocumentDefinition {
    /// Create a definition from content blocks, with no header or footer.
    pub fn new(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            header: None,
            footer: None,
            content: blocks.into_iter().map(Some).collect(),
        }
    }

    /// Set the header image reference (URL, data URI, or bare base64).
    pub fn with_header_image(mut self, reference: impl Into<String>) -> Self {
        self.header = Some(PageBand {
            image: Some(reference.into()),
        });
        self
    }

    /// Set the footer image reference (URL, data URI, or bare base64).
    pub fn with_footer_image(mut self, reference: impl Into<String>) -> Self {
        self.footer = Some(PageBand {
            image: Some(reference.into()),
        });
        self
    }
}

/// A header or footer band holding an optional image reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageBand {
    /// Image reference: URL, `data:` URI, or a bare base64 PNG payload.
    #[serde(default)]
    pub image: Option<String>,
}

/// A content block.
///
/// Variant order matters: untagged deserialization probes `text`, then
/// `columns`, then `table`, matching the original field-presence checks. A
/// map with none of those keys is rejected at this boundary rather than
/// guessed at.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Block {
    /// A paragraph line.
    Text(TextBlock),
    /// A group of columns rendered on one line.
    Columns(ColumnsBlock),
    /// A table; every row becomes one line.
    Table(TableBlock),
}

impl Block {
    /// Build a text block.
    pub fn text(text: impl Into<TextValue>) -> Self {
        Block::Text(TextBlock { text: text.into() })
    }

    /// Build a columns block.
    pub fn columns(columns: impl IntoIterator<Item = Column>) -> Self {
        Block::Columns(ColumnsBlock {
            columns: columns.into_iter().collect(),
        })
    }

    /// Build a table block from its rows.
    pub fn table(rows: Vec<Vec<Cell>>) -> Self {
        Block::Table(TableBlock {
            table: TableRows { body: rows },
        })
    }
}

/// A text paragraph: a single string or a sequence joined with spaces.
#[derive(Debug, Clone, Deserialize)]
pub struct TextBlock {
    /// The paragraph text.
    pub text: TextValue,
}

impl TextBlock {
    /// Create a text block.
    pub fn new(text: impl Into<TextValue>) -> Self {
        Self { text: text.into() }
    }
}

/// Text content: one string, or several fragments joined with a space.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    /// A single string.
    One(String),
    /// Fragments joined with a single space when rendered.
    Many(Vec<String>),
}

impl TextValue {
    /// Render the value as a single line.
    pub fn joined(&self) -> String {
        match self {
            TextValue::One(text) => text.clone(),
            TextValue::Many(parts) => parts.join(" "),
        }
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue::One(text.to_string())
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue::One(text)
    }
}

impl From<Vec<String>> for TextValue {
    fn from(parts: Vec<String>) -> Self {
        TextValue::Many(parts)
    }
}

/// A group of columns rendered side by side on one line.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsBlock {
    /// The columns, left to right.
    pub columns: Vec<Column>,
}

/// One column entry: a bare string, a text block, or nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Column {
    /// Bare string content.
    Str(String),
    /// Text block content; only its `text` contributes.
    Text(TextBlock),
    /// `null` or any shape outside the contract; renders as empty.
    Empty(IgnoredAny),
}

impl From<&str> for Column {
    fn from(text: &str) -> Self {
        Column::Str(text.to_string())
    }
}

impl From<String> for Column {
    fn from(text: String) -> Self {
        Column::Str(text)
    }
}

/// A table block wrapping its row body.
#[derive(Debug, Clone, Deserialize)]
pub struct TableBlock {
    /// The table body.
    pub table: TableRows,
}

/// Table rows. Extra table attributes (column widths, header-row counts)
/// are accepted on the wire and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRows {
    /// Rows of cells, top to bottom.
    pub body: Vec<Vec<Cell>>,
}

/// One table cell.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// String content, rendered as-is.
    Str(String),
    /// Numeric content, rendered in its decimal text form.
    Number(f64),
    /// Text block content.
    Text(TextBlock),
    /// `null` or any shape outside the contract; renders as empty.
    Empty(IgnoredAny),
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Str(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Str(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}
