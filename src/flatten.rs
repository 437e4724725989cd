//! Content flattening: block tree to plain text lines.
//!
//! The page layout is line-oriented, so every block shape is normalized to
//! an ordered list of strings before any operator is emitted. Flattening is
//! pure and idempotent: no I/O, and re-flattening its own output (as text
//! blocks) reproduces the same lines.

use crate::definition::{Block, Cell, Column};

/// Separator between rendered columns.
const COLUMN_GAP: &str = "    ";
/// Separator between rendered table cells.
const CELL_SEPARATOR: &str = " | ";

/// Flatten content blocks into ordered plain text lines.
///
/// `None` blocks are skipped. Text blocks contribute a line only when
/// non-empty; column groups only when non-blank after trimming. Table rows
/// always contribute a line, blank or not, so row counts survive the
/// round trip.
pub fn flatten(blocks: &[Option<Block>]) -> Vec<String> {
    let mut lines = Vec::new();
    for block in blocks.iter().flatten() {
        match block {
            Block::Text(text) => {
                let line = text.text.joined();
                if !line.is_empty() {
                    lines.push(line);
                }
            },
            Block::Columns(group) => {
                let line = group
                    .columns
                    .iter()
                    .map(column_text)
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP);
                if !line.trim().is_empty() {
                    lines.push(line);
                }
            },
            Block::Table(table) => {
                for row in &table.table.body {
                    let line = row.iter().map(cell_text).collect::<Vec<_>>().join(CELL_SEPARATOR);
                    lines.push(line);
                }
            },
        }
    }
    lines
}

fn column_text(column: &Column) -> String {
    match column {
        Column::Str(text) => text.clone(),
        Column::Text(block) => block.text.joined(),
        Column::Empty(_) => String::new(),
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Str(text) => text.clone(),
        Cell::Number(value) => value.to_string(),
        Cell::Text(block) => block.text.joined(),
        Cell::Empty(_) => String::new(),
    }
}
