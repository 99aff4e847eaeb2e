//! Residual tag stripping.
//!
//! Runs after region and row removal: every bracket tag still present, of
//! any kind and any label, is erased from paragraph text while the
//! surrounding content and run formatting stay put. Paragraph-level
//! flattening catches tags split across `w:t` fragments; a tag cannot span
//! paragraphs.

use crate::tag::TagLexicon;
use crate::text::{complement, FlatText};
use crate::xml::Element;

/// Strip every remaining tag under the body. Returns the number of tag
/// occurrences removed. Nodes emptied here are left in place for the
/// structural cleaner.
pub(crate) fn strip_tags(el: &mut Element, lexicon: &TagLexicon) -> usize {
    let mut stripped = 0;
    for child in &mut el.children {
        let Some(child_el) = child.as_element_mut() else {
            continue;
        };
        if child_el.name == "w:p" {
            stripped += strip_paragraph(child_el, lexicon);
        } else {
            stripped += strip_tags(child_el, lexicon);
        }
    }
    stripped
}

fn strip_paragraph(paragraph: &mut Element, lexicon: &TagLexicon) -> usize {
    let flat = FlatText::flatten(paragraph);
    let matches = lexicon.scan_all(flat.text());
    if matches.is_empty() {
        return 0;
    }
    let remove: Vec<_> = matches.iter().map(|m| m.range.clone()).collect();
    let keep = complement(flat.text().len(), &remove);
    flat.rewrite(paragraph, &keep);
    matches.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn run(xml_body: &str) -> (Element, usize) {
        let (_, mut body) = xml::parse(&format!("<w:body>{}</w:body>", xml_body)).unwrap();
        let stripped = strip_tags(&mut body, &TagLexicon::new());
        (body, stripped)
    }

    #[test]
    fn test_strips_every_kind_and_label() {
        let (body, stripped) = run(
            "<w:p><w:r><w:t>a [[BLOCK_START5]]b[[BLOCK_END]] c [[SECTION_START9]]d[[SECTION_END]] e [[ROW1]]f</w:t></w:r></w:p>",
        );
        assert_eq!(stripped, 5);
        let text = FlatText::flatten(&body).text().to_string();
        assert_eq!(text, "a b c d e f");
    }

    #[test]
    fn test_tag_split_across_fragments() {
        let (body, stripped) = run(
            "<w:p><w:r><w:t>Hi [[BLO</w:t></w:r><w:r><w:t>CK_END]] there</w:t></w:r></w:p>",
        );
        assert_eq!(stripped, 1);
        assert_eq!(FlatText::flatten(&body).text(), "Hi  there");
    }

    #[test]
    fn test_paragraphs_inside_cells_reached() {
        let (body, stripped) = run(
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>[[ROW3]] cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        assert_eq!(stripped, 1);
        assert_eq!(FlatText::flatten(&body).text(), " cell");
    }

    #[test]
    fn test_emptied_paragraph_not_deleted() {
        let (body, _) = run("<w:p><w:r><w:t>[[ROW2]]</w:t></w:r></w:p>");
        assert_eq!(body.child_elements().count(), 1);
        assert_eq!(FlatText::flatten(&body).text(), "");
    }

    #[test]
    fn test_text_without_tags_untouched() {
        let (body, stripped) = run("<w:p><w:r><w:t>[not a tag] [[ALMOST]]</w:t></w:r></w:p>");
        assert_eq!(stripped, 0);
        assert_eq!(FlatText::flatten(&body).text(), "[not a tag] [[ALMOST]]");
    }
}
