//! Region removal: the START/END state machine.
//!
//! Scans the body's block-level nodes against the flattened text of each,
//! deleting or trimming everything between a labeled START tag and its
//! family's END tag. Edits are planned against an immutable snapshot of the
//! node sequence and applied in one pass; the whole scan repeats until it
//! reaches a fixed point, so a trim that exposes a new dangling START is
//! picked up by the next pass.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::document::{as_block, remove_children, BlockKind};
use crate::tag::{TagFamily, TagKind, TagLexicon};
use crate::text::{FlatText, KeptText};
use crate::xml::Element;

use super::{PipelineWarning, ProcessReport};

/// Bound on repeated in-node pair erasure.
const MAX_INLINE_PAIRS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    InRegion,
}

/// One planned edit against the snapshotted block sequence.
enum Edit {
    Delete(usize),
    Rewrite {
        index: usize,
        flat: FlatText,
        keep: Vec<Range<usize>>,
    },
}

/// Remove every region opened by a START tag carrying `label` for one
/// family, repeating until a pass produces zero structural changes.
pub(crate) fn remove_regions(
    body: &mut Element,
    family: TagFamily,
    label: &str,
    lexicon: &TagLexicon,
    report: &mut ProcessReport,
) {
    loop {
        let edits = plan_pass(body, family, label, lexicon, report);
        if edits.is_empty() {
            break;
        }
        apply(body, edits, report);
    }
}

fn plan_pass(
    body: &Element,
    family: TagFamily,
    label: &str,
    lexicon: &TagLexicon,
    report: &mut ProcessReport,
) -> Vec<Edit> {
    let start_kind = family.start_kind();
    let end_kind = family.end_kind();
    let mut edits = Vec::new();
    let mut state = State::Scanning;

    for (index, node) in body.children.iter().enumerate() {
        let Some((kind, el)) = as_block(node) else {
            continue;
        };
        let flat = FlatText::flatten(el);

        match state {
            State::Scanning => {
                let Some(start) = lexicon.find(flat.text(), start_kind, Some(label)) else {
                    continue;
                };
                let closed_inline = lexicon
                    .find_at(flat.text(), end_kind, None, start.range.end)
                    .is_some();

                if kind == BlockKind::Table {
                    // tables are deleted whole, never trimmed
                    edits.push(Edit::Delete(index));
                    if !closed_inline {
                        state = State::InRegion;
                    }
                    continue;
                }

                let mut kept = KeptText::new(flat.text());
                if closed_inline {
                    erase_inline_pairs(&mut kept, start_kind, end_kind, label, lexicon);
                }
                // A START left over has no END after it: trim to its prefix
                // and open a region across the following nodes.
                let current = kept.current();
                if let Some(open) = lexicon.find(&current, start_kind, Some(label)) {
                    kept.erase(open.range.start..current.len());
                    state = State::InRegion;
                }

                if kept.is_blank() {
                    edits.push(Edit::Delete(index));
                } else {
                    let keep = kept.into_ranges();
                    edits.push(Edit::Rewrite { index, flat, keep });
                }
            }
            State::InRegion => match lexicon.find(flat.text(), end_kind, None) {
                Some(end) => {
                    state = State::Scanning;
                    if kind == BlockKind::Table {
                        edits.push(Edit::Delete(index));
                        continue;
                    }
                    let mut kept = KeptText::new(flat.text());
                    kept.erase(0..end.range.end);
                    if kept.is_blank() {
                        edits.push(Edit::Delete(index));
                    } else {
                        let keep = kept.into_ranges();
                        edits.push(Edit::Rewrite { index, flat, keep });
                    }
                }
                None => edits.push(Edit::Delete(index)),
            },
        }
    }

    if state == State::InRegion {
        log::warn!(
            "{} region left unterminated at end of document body",
            family.name()
        );
        report.warnings.push(PipelineWarning::UnterminatedRegion {
            family: family.name().to_string(),
        });
    }
    edits
}

/// Erase every leftmost labeled START .. END span inside one node,
/// repeating on the residual text.
fn erase_inline_pairs(
    kept: &mut KeptText,
    start_kind: TagKind,
    end_kind: TagKind,
    label: &str,
    lexicon: &TagLexicon,
) {
    for _ in 0..MAX_INLINE_PAIRS {
        let current = kept.current();
        let Some(start) = lexicon.find(&current, start_kind, Some(label)) else {
            break;
        };
        let Some(end) = lexicon.find_at(&current, end_kind, None, start.range.end) else {
            break;
        };
        kept.erase(start.range.start..end.range.end);
    }
}

fn apply(body: &mut Element, edits: Vec<Edit>, report: &mut ProcessReport) {
    let mut deletions = BTreeSet::new();
    for edit in edits {
        match edit {
            Edit::Delete(index) => {
                deletions.insert(index);
            }
            Edit::Rewrite { index, flat, keep } => {
                if let Some(el) = body.children[index].as_element_mut() {
                    flat.rewrite(el, &keep);
                    report.nodes_trimmed += 1;
                }
            }
        }
    }
    report.nodes_removed += deletions.len();
    log::debug!(
        "region pass: {} node(s) removed, {} trimmed",
        deletions.len(),
        report.nodes_trimmed
    );
    remove_children(body, &deletions);
}
