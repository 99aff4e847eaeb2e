//! Table-row filtering by ROW tag.

use std::collections::BTreeSet;

use crate::document::remove_children;
use crate::tag::{TagKind, TagLexicon};
use crate::text::FlatText;
use crate::xml::{Element, XmlNode};

/// Delete every table row whose flattened text carries `[[ROW<label>]]`,
/// recursing into tables nested inside cells. Returns the number of rows
/// removed.
pub(crate) fn filter_rows(body: &mut Element, label: &str, lexicon: &TagLexicon) -> usize {
    remove_rows(body, label, lexicon)
}

fn remove_rows(el: &mut Element, label: &str, lexicon: &TagLexicon) -> usize {
    let mut doomed = BTreeSet::new();
    for (index, child) in el.children.iter().enumerate() {
        let Some(child_el) = child.as_element() else {
            continue;
        };
        if child_el.name == "w:tr" {
            let flat = FlatText::flatten(child_el);
            if lexicon.find(flat.text(), TagKind::Row, Some(label)).is_some() {
                doomed.insert(index);
            }
        }
    }
    let mut removed = doomed.len();
    if removed > 0 {
        log::debug!("removed {} row(s) tagged ROW{}", removed, label);
    }
    remove_children(el, &doomed);

    for child in &mut el.children {
        if let XmlNode::Element(child_el) = child {
            removed += remove_rows(child_el, label, lexicon);
        }
    }
    removed
}
