//! Integration tests for container handling and the file-level API.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use untag::{process_bytes, process_file, Error, Package, ProcessOptions};

const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0"?><Types/>"#;
const STYLES: &[u8] = br#"<?xml version="1.0"?><w:styles/>"#;

fn build_docx(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(CONTENT_TYPES).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.start_file("word/styles.xml", options).unwrap();
    writer.write_all(STYLES).unwrap();
    writer.finish().unwrap().into_inner()
}

#[test]
fn test_other_entries_byte_identical() {
    let input = build_docx(
        "<w:p><w:r><w:t>[[BLOCK_START0]]x[[BLOCK_END]] kept</w:t></w:r></w:p>",
    );
    let (output, _) = process_bytes(&input, ProcessOptions::default()).unwrap();

    let package = Package::from_bytes(&output).unwrap();
    assert_eq!(package.entry("[Content_Types].xml").unwrap(), CONTENT_TYPES);
    assert_eq!(package.entry("word/styles.xml").unwrap(), STYLES);

    let names: Vec<_> = package.entry_names().collect();
    assert_eq!(
        names,
        vec!["[Content_Types].xml", "word/document.xml", "word/styles.xml"]
    );
}

#[test]
fn test_process_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.docx");
    let output_path = dir.path().join("output.docx");
    std::fs::write(
        &input_path,
        build_docx("<w:p><w:r><w:t>[[SECTION_START0]]gone[[SECTION_END]] stays</w:t></w:r></w:p>"),
    )
    .unwrap();

    let report = process_file(&input_path, &output_path).unwrap();
    assert_eq!(report.nodes_trimmed, 1);

    let package = Package::open(&output_path).unwrap();
    let xml = String::from_utf8(package.document_part().unwrap().to_vec()).unwrap();
    assert!(xml.contains("stays"));
    assert!(!xml.contains("gone"));
    assert!(!xml.contains("SECTION"));
}

#[test]
fn test_missing_document_part() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/styles.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(STYLES).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let err = process_bytes(&bytes, ProcessOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingPart(_)));
}

#[test]
fn test_malformed_document_xml() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(b"<w:document><w:body>").unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    assert!(process_bytes(&bytes, ProcessOptions::default()).is_err());
}

#[test]
fn test_invalid_label_reported_before_touching_output() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.docx");
    let output_path = dir.path().join("output.docx");
    std::fs::write(&input_path, build_docx("<w:p/>")).unwrap();

    let err = untag::process_file_with_options(
        &input_path,
        &output_path,
        ProcessOptions::new().with_label("abc"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidLabel(_)));
    assert!(!output_path.exists());
}
