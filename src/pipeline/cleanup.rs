//! Structural cleanup: blank-page collapse and empty-paragraph purge.

use std::collections::BTreeSet;

use crate::document::{as_block, has_break_marker, has_graphic, remove_children, BlockKind};
use crate::text::FlatText;
use crate::xml::Element;

/// Classification of a top-level block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeClass {
    /// Visible text, an embedded graphic, or any table.
    Content,
    /// A break marker with no content.
    Break,
    /// Both content and a break marker.
    ContentAndBreak,
    /// A paragraph with neither text, graphic, nor break marker.
    EmptyParagraph,
}

fn classify(kind: BlockKind, el: &Element) -> NodeClass {
    if kind == BlockKind::Table {
        return NodeClass::Content;
    }
    let has_content = !FlatText::flatten(el).is_blank() || has_graphic(el);
    match (has_content, has_break_marker(el)) {
        (true, true) => NodeClass::ContentAndBreak,
        (true, false) => NodeClass::Content,
        (false, true) => NodeClass::Break,
        (false, false) => NodeClass::EmptyParagraph,
    }
}

/// Run the blank-page pass, then the purge pass. Returns the number of
/// break nodes and empty paragraphs removed.
pub(crate) fn clean_structure(body: &mut Element) -> (usize, usize) {
    let breaks_removed = blank_page_pass(body);
    let purged = purge_pass(body);
    if breaks_removed + purged > 0 {
        log::debug!(
            "structural cleanup removed {} blank-page break(s) and {} empty paragraph(s)",
            breaks_removed,
            purged
        );
    }
    (breaks_removed, purged)
}

/// Snapshot of (body child index, classification) for every block node.
fn snapshot(body: &Element) -> Vec<(usize, NodeClass)> {
    body.children
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            as_block(node).map(|(kind, el)| (index, classify(kind, el)))
        })
        .collect()
}

/// Delete each break node that bounds nothing but empty paragraphs before
/// the next break.
fn blank_page_pass(body: &mut Element) -> usize {
    let classes = snapshot(body);
    let mut doomed = BTreeSet::new();
    for (position, &(index, class)) in classes.iter().enumerate() {
        if class != NodeClass::Break {
            continue;
        }
        let mut next = position + 1;
        while next < classes.len() && classes[next].1 == NodeClass::EmptyParagraph {
            next += 1;
        }
        if next < classes.len()
            && matches!(
                classes[next].1,
                NodeClass::Break | NodeClass::ContentAndBreak
            )
        {
            doomed.insert(index);
        }
    }
    remove_children(body, &doomed);
    doomed.len()
}

/// Delete every node still classified as an empty paragraph.
fn purge_pass(body: &mut Element) -> usize {
    let doomed: BTreeSet<usize> = snapshot(body)
        .into_iter()
        .filter(|&(_, class)| class == NodeClass::EmptyParagraph)
        .map(|(index, _)| index)
        .collect();
    remove_children(body, &doomed);
    doomed.len()
}
