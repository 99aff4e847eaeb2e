//! Integration tests for the full processing pipeline.

use untag::{DocxDocument, Pipeline, PipelineWarning, ProcessOptions};

const DOCUMENT_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn document(body: &str) -> DocxDocument {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        DOCUMENT_NS, body
    );
    DocxDocument::parse(xml.as_bytes()).unwrap()
}

fn para(text: &str) -> String {
    format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
}

fn page_break() -> String {
    r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#.to_string()
}

fn table(rows: &[&str]) -> String {
    let body: String = rows
        .iter()
        .map(|text| format!("<w:tr><w:tc>{}</w:tc></w:tr>", para(text)))
        .collect();
    format!("<w:tbl>{}</w:tbl>", body)
}

fn body_texts(doc: &DocxDocument) -> Vec<String> {
    doc.body()
        .child_elements()
        .map(|el| untag::text::FlatText::flatten(el).text().to_string())
        .collect()
}

fn process(doc: &mut DocxDocument, options: ProcessOptions) -> untag::ProcessReport {
    Pipeline::new(options).unwrap().process(doc)
}

#[test]
fn test_whole_paragraph_region_removed() {
    let mut doc = document(&format!(
        "{}{}{}{}",
        para("before"),
        para("[[BLOCK_START0]]"),
        para("inside"),
        para("[[BLOCK_END]] after"),
    ));
    process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec!["before", " after"]);
}

#[test]
fn test_region_trims_boundary_paragraphs() {
    let mut doc = document(&format!(
        "{}{}{}",
        para("keep [[SECTION_START0]]drop"),
        para("gone entirely"),
        para("drop[[SECTION_END]] keep"),
    ));
    let report = process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec!["keep ", " keep"]);
    assert_eq!(report.nodes_removed, 1);
    assert_eq!(report.nodes_trimmed, 2);
}

#[test]
fn test_other_labels_survive_with_tags_stripped() {
    let mut doc = document(&format!(
        "{}{}",
        para("[[BLOCK_START0]]zero[[BLOCK_END]]"),
        para("[[BLOCK_START1]]one[[BLOCK_END]]"),
    ));
    process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec!["one"]);
}

#[test]
fn test_table_inside_region_deleted_whole() {
    let mut doc = document(&format!(
        "{}{}{}{}",
        para("[[BLOCK_START0]]"),
        table(&["cell one", "cell two"]),
        para("[[BLOCK_END]]"),
        para("tail"),
    ));
    process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec!["tail"]);
}

#[test]
fn test_tagged_rows_filtered() {
    let mut doc = document(&table(&["header", "[[ROW0]] doomed", "[[ROW1]] kept", "footer"]));
    let report = process(&mut doc, ProcessOptions::default());
    assert_eq!(report.rows_removed, 1);
    let text = body_texts(&doc).concat();
    assert!(text.contains("header"));
    assert!(text.contains(" kept"));
    assert!(text.contains("footer"));
    assert!(!text.contains("doomed"));
    assert!(!text.contains("[["));
}

#[test]
fn test_families_are_independent() {
    // a SECTION_END cannot close a BLOCK region
    let mut doc = document(&format!(
        "{}{}{}{}",
        para("[[BLOCK_START0]]"),
        para("inside"),
        para("[[SECTION_END]]"),
        para("[[BLOCK_END]] tail"),
    ));
    let report = process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec![" tail"]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_unterminated_region_warns_and_removes_to_end() {
    let mut doc = document(&format!(
        "{}{}{}",
        para("before"),
        para("[[SECTION_START0]]"),
        para("swallowed"),
    ));
    let report = process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec!["before"]);
    assert_eq!(
        report.warnings,
        vec![PipelineWarning::UnterminatedRegion {
            family: "SECTION".to_string(),
        }]
    );
}

#[test]
fn test_tag_split_across_runs() {
    let mut doc = document(concat!(
        "<w:p><w:r><w:t>[[BLOCK_</w:t></w:r>",
        "<w:r><w:t>START0]]gone[[BLOCK</w:t></w:r>",
        "<w:r><w:t>_END]] kept</w:t></w:r></w:p>",
    ));
    process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec![" kept"]);
}

#[test]
fn test_blank_page_collapsed_after_removal() {
    let mut doc = document(&format!(
        "{}{}{}{}{}{}",
        para("page one"),
        page_break(),
        para("[[BLOCK_START0]]only content on page two[[BLOCK_END]]"),
        page_break(),
        para("page three"),
        para(""),
    ));
    let report = process(&mut doc, ProcessOptions::default());
    assert_eq!(body_texts(&doc), vec!["page one", "", "page three"]);
    assert_eq!(report.breaks_removed, 1);
    assert!(report.paragraphs_purged >= 1);
}

#[test]
fn test_first_page_sentinel() {
    let mut doc = document(&format!(
        "{}{}{}",
        para("Thẻ 1"),
        page_break(),
        para("real content"),
    ));
    let report = process(&mut doc, ProcessOptions::default());
    assert!(report.first_page_removed);
    assert_eq!(body_texts(&doc), vec!["real content"]);
}

#[test]
fn test_custom_removal_label() {
    let mut doc = document(&format!(
        "{}{}",
        para("[[BLOCK_START0]]zero[[BLOCK_END]]"),
        para("[[BLOCK_START12]]twelve[[BLOCK_END]]"),
    ));
    process(&mut doc, ProcessOptions::new().with_label("12"));
    assert_eq!(body_texts(&doc), vec!["zero"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let mut doc = document(&format!(
        "{}{}{}{}{}",
        para("thẻ 1"),
        page_break(),
        para("keep [[BLOCK_START0]]drop"),
        para("[[BLOCK_END]] tail"),
        table(&["[[ROW0]] doomed", "kept row"]),
    ));
    process(&mut doc, ProcessOptions::default());
    let first = doc.to_bytes().unwrap();

    let mut again = DocxDocument::parse(&first).unwrap();
    let report = process(&mut again, ProcessOptions::default());
    assert!(report.is_noop());
    assert_eq!(again.to_bytes().unwrap(), first);
}

#[test]
fn test_untagged_document_unchanged() {
    let source = format!(
        "{}{}{}",
        para("plain paragraph"),
        page_break(),
        table(&["row one", "row two"]),
    );
    let mut doc = document(&source);
    let report = process(&mut doc, ProcessOptions::default());
    assert!(report.is_noop());
    assert_eq!(
        body_texts(&doc),
        vec!["plain paragraph", "", "row onerow two"]
    );
}
