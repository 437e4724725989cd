//! Invoice payloads and their document definitions.
//!
//! The dashboard's backend serves a flat invoice payload per claim; this
//! module gives that wire shape a type and maps it onto the block layout the
//! dashboard prints: title, date and claim reference, payee, an items table
//! with a header row, right-hand totals, and an optional approval line.

use serde::Deserialize;

use crate::definition::{Block, Cell, Column, DocumentDefinition};

/// One priced line of an invoice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Item description.
    pub item_name: String,
    /// Units claimed.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: f64,
    /// Extended line total.
    pub line_total: f64,
}

/// The invoice payload served by the dashboard backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePdfData {
    /// Invoice number, e.g. `INV-2024-0042`.
    pub invoice_number: String,
    /// Issue date in its display form.
    pub invoice_date: String,
    /// Name of the payee.
    pub claimant_name: String,
    /// Reference of the originating expense claim.
    pub claim_reference: String,
    /// Priced invoice lines.
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    /// Sum of line totals.
    pub subtotal: f64,
    /// Tax amount.
    pub tax: f64,
    /// Grand total.
    pub total: f64,
    /// Whether a manager signed the claim off.
    #[serde(default)]
    pub manager_approved: bool,
    /// Base64 letterhead raster, when configured.
    #[serde(default)]
    pub header_image: Option<String>,
    /// Base64 footer raster, when configured.
    #[serde(default)]
    pub footer_image: Option<String>,
}

/// Map an invoice payload onto a printable document definition.
pub fn invoice_document(data: &InvoicePdfData) -> DocumentDefinition {
    let mut rows = vec![vec![
        Cell::from("Item"),
        Cell::from("Qty"),
        Cell::from("Price"),
        Cell::from("Line Total"),
    ]];
    for item in &data.items {
        rows.push(vec![
            Cell::from(item.item_name.clone()),
            Cell::Number(f64::from(item.quantity)),
            Cell::from(currency(item.unit_price)),
            Cell::from(currency(item.line_total)),
        ]);
    }

    let mut blocks = vec![
        Block::text(format!("Invoice {}", data.invoice_number)),
        Block::columns([
            Column::from(format!("Date: {}", data.invoice_date)),
            Column::from(format!("Claim Reference: {}", data.claim_reference)),
        ]),
        Block::text(format!("Payee: {}", data.claimant_name)),
        Block::table(rows),
        Block::columns([
            Column::from(format!("Subtotal: {}", currency(data.subtotal))),
            Column::from(format!("Tax: {}", currency(data.tax))),
            Column::from(format!("Total: {}", currency(data.total))),
        ]),
    ];
    if data.manager_approved {
        blocks.push(Block::text("Approved by Manager"));
    }

    let mut doc = DocumentDefinition::new(blocks);
    if let Some(reference) = &data.header_image {
        doc = doc.with_header_image(reference.clone());
    }
    if let Some(reference) = &data.footer_image {
        doc = doc.with_footer_image(reference.clone());
    }
    doc
}

/// Format an amount as US dollars: two decimals, thousands separators.
pub fn currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}
