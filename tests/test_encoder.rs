//! Integration tests for the document encoder.
//!
//! Exercises the full pipeline from document definition to finished byte
//! buffer: file framing, cross-reference integrity, text layout, resource
//! dictionaries, and the failure paths.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use pdf_slate::{
    encode_document, export_to_file, Block, Cell, Column, DocumentDefinition, DocumentEncoder,
    EmbeddedRasterHost, HeadlessRasterHost,
};

/// Route the encoder's log reports into the test harness capture.
fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory PNG wrapped as a data URI.
fn png_data_uri(width: u32, height: u32) -> String {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([20, 60, 120]));
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .expect("png encode");
    format!("data:image/png;base64,{}", BASE64.encode(&png))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|window| window == needle)
}

#[test]
fn test_output_starts_with_pdf_header() {
    let doc = DocumentDefinition::new([Block::text("Hello")]);
    let bytes = encode_document(&doc).expect("encode");
    assert_eq!(&bytes[..9], b"%PDF-1.4\n");
}

#[test]
fn test_output_ends_with_eof_marker() {
    let doc = DocumentDefinition::new([Block::text("Hello")]);
    let bytes = encode_document(&doc).expect("encode");
    assert!(bytes.ends_with(b"%%EOF"));
}

#[test]
fn test_xref_offsets_point_at_every_object() {
    // Include an image so the buffer contains binary stream data; the xref
    // offsets must hold regardless.
    let doc = DocumentDefinition::new([
        Block::text("Hello"),
        Block::table(vec![vec![Cell::from("A"), Cell::from(1.0)]]),
    ])
    .with_header_image(png_data_uri(300, 120));
    let bytes = encode_document(&doc).expect("encode");

    let startxref = rfind(&bytes, b"startxref\n").expect("startxref keyword");
    let tail = std::str::from_utf8(&bytes[startxref..]).expect("ascii tail");
    let xref_offset: usize = tail
        .lines()
        .nth(1)
        .expect("xref offset line")
        .trim()
        .parse()
        .expect("xref offset digits");

    let xref = std::str::from_utf8(&bytes[xref_offset..startxref]).expect("ascii xref");
    let mut lines = xref.lines();
    assert_eq!(lines.next(), Some("xref"));
    let size: usize = lines
        .next()
        .expect("subsection line")
        .strip_prefix("0 ")
        .expect("subsection start")
        .parse()
        .expect("subsection size");
    assert_eq!(lines.next(), Some("0000000000 65535 f "));

    for id in 1..size {
        let entry = lines.next().expect("xref entry");
        let offset: usize = entry[..10].parse().expect("offset digits");
        let marker = format!("{} 0 obj\n", id);
        assert!(
            bytes[offset..].starts_with(marker.as_bytes()),
            "xref offset {} does not point at `{} 0 obj`",
            offset,
            id
        );
    }
}

#[test]
fn test_trailer_names_size_and_root() {
    let doc = DocumentDefinition::new([Block::text("Hello")]);
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);
    // font, content, page, pages, catalog
    assert!(text.contains("trailer << /Size 6 /Root 5 0 R >>"));
}

#[test]
fn test_hello_document_scenario() {
    let doc = DocumentDefinition::new([Block::text("Hello")]);
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);

    assert_eq!(text.matches(" Tj").count(), 1);
    assert!(text.contains("(Hello) Tj"));
    assert!(text.contains("/Count 1"));
    assert!(text.contains("/Font << /F1 1 0 R >>"));
    assert!(!text.contains("/XObject"));
}

#[test]
fn test_table_row_renders_with_pipe_separators() {
    let doc = DocumentDefinition::new([Block::table(vec![vec![
        Cell::from("A"),
        Cell::from(1.0),
        Cell::from("$2.00"),
        Cell::from("$2.00"),
    ]])]);
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(A | 1 | $2.00 | $2.00) Tj"));
}

#[test]
fn test_columns_render_with_four_space_gap() {
    let doc = DocumentDefinition::new([Block::columns([
        Column::from("Date: 2024-03-01"),
        Column::from("Claim Reference: CLM-19"),
    ])]);
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(Date: 2024-03-01    Claim Reference: CLM-19) Tj"));
}

#[test]
fn test_fifty_blocks_truncate_to_thirty_four_operators() {
    let doc =
        DocumentDefinition::new((1..=50).map(|index| Block::text(format!("row {}", index))));
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);

    assert_eq!(text.matches(" Tj").count(), 34);
    assert!(text.contains("(row 34) Tj"));
    // Dropped whole, never cut mid-line.
    assert!(!text.contains("(row 35"));
    assert!(!text.contains("(row 50"));
}

#[test]
fn test_parenthesized_text_is_escaped_once() {
    let doc = DocumentDefinition::new([Block::text("total (net)")]);
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("(total \\(net\\)) Tj"));
}

#[test]
fn test_headless_host_builds_without_images() {
    let doc = DocumentDefinition::new([Block::text("Hello")])
        .with_header_image(png_data_uri(300, 120));
    let bytes = DocumentEncoder::new(&HeadlessRasterHost).encode(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);

    assert!(!text.contains("/XObject"));
    assert!(find(&bytes, b"Do Q").is_none());
    assert!(text.contains("(Hello) Tj"));
}

#[test]
fn test_undecodable_image_fails_the_build() {
    init_logs();
    let doc = DocumentDefinition::new([Block::text("Hello")])
        .with_header_image(format!("data:image/png;base64,{}", BASE64.encode(b"not a png")));
    assert!(encode_document(&doc).is_err());
}

#[test]
fn test_export_saves_exactly_the_encoded_bytes() {
    init_logs();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("invoice.pdf");
    let doc = DocumentDefinition::new([Block::text("Hello")]);

    assert!(export_to_file(&doc, &EmbeddedRasterHost, &path));
    let saved = std::fs::read(&path).expect("read back");
    let encoded = encode_document(&doc).expect("encode");
    assert_eq!(saved, encoded);
}

#[test]
fn test_export_reports_failure_and_writes_nothing() {
    init_logs();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("invoice.pdf");
    let doc = DocumentDefinition::new([Block::text("Hello")])
        .with_header_image("data:image/png;base64,@@@@");

    assert!(!export_to_file(&doc, &EmbeddedRasterHost, &path));
    assert!(!path.exists());
}

#[test]
fn test_concurrent_builds_share_nothing() {
    let doc = DocumentDefinition::new([Block::text("Hello")]);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = doc.clone();
            std::thread::spawn(move || encode_document(&doc).expect("encode"))
        })
        .collect();
    let first = encode_document(&doc).expect("encode");
    for handle in handles {
        assert_eq!(handle.join().expect("join"), first);
    }
}

#[test]
fn test_duck_typed_json_definition_round_trips() {
    let doc: DocumentDefinition = serde_json::from_str(
        r#"{
            "content": [
                { "text": "Invoice INV-7", "style": "title" },
                { "columns": [ { "text": "Date: 2024-03-01", "width": "50%" }, null ] },
                { "table": { "headerRows": 1, "body": [["Item", "Qty"], ["A", 1]] } },
                null
            ]
        }"#,
    )
    .expect("deserialize");
    let bytes = encode_document(&doc).expect("encode");
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("(Invoice INV-7) Tj"));
    // The null column renders empty, leaving the gap in place.
    assert!(text.contains("(Date: 2024-03-01    ) Tj"));
    assert!(text.contains("(Item | Qty) Tj"));
    assert!(text.contains("(A | 1) Tj"));
}
