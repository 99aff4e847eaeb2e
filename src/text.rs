//! Flattened text access over `w:t` fragments.
//!
//! A paragraph's visible text is usually split across several `w:t`
//! fragments, and a tag can straddle any of those splits. The accessor
//! flattens all fragments under a node into one string, keeps an offset
//! map back to each fragment, and can rewrite the fragments from a set of
//! kept ranges without disturbing run formatting.

use std::ops::Range;

use crate::xml::{Element, XmlNode};

/// One `w:t` fragment: where it lives and which slice of the flattened
/// text it contributed.
#[derive(Debug, Clone)]
struct Fragment {
    /// Child-index path from the flattened element down to the `w:t`.
    path: Vec<usize>,
    /// Half-open byte range within the flattened text.
    range: Range<usize>,
}

/// Flattened view of every text fragment under a node.
#[derive(Debug, Clone)]
pub struct FlatText {
    text: String,
    fragments: Vec<Fragment>,
}

impl FlatText {
    /// Concatenate every `w:t` fragment under the element in document
    /// order, recording each fragment's offset range.
    pub fn flatten(el: &Element) -> Self {
        let mut text = String::new();
        let mut fragments = Vec::new();
        let mut path = Vec::new();
        collect(el, &mut path, &mut text, &mut fragments);
        Self { text, fragments }
    }

    /// The flattened text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if the flattened text has no visible (non-whitespace) content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of fragments found.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Rewrite fragments so only the `keep` ranges of the flattened text
    /// survive. `keep` must be sorted and non-overlapping. A fragment with
    /// no surviving intersection becomes empty but is not removed.
    pub fn rewrite(&self, el: &mut Element, keep: &[Range<usize>]) {
        for fragment in &self.fragments {
            let mut kept = String::new();
            for range in keep {
                let lo = range.start.max(fragment.range.start);
                let hi = range.end.min(fragment.range.end);
                if lo < hi {
                    kept.push_str(&self.text[lo..hi]);
                }
            }
            if let Some(target) = el.descendant_mut(&fragment.path) {
                target.set_text(&kept);
            }
        }
    }
}

fn collect(el: &Element, path: &mut Vec<usize>, text: &mut String, fragments: &mut Vec<Fragment>) {
    if el.name == "w:t" {
        let start = text.len();
        text.push_str(&el.text_content());
        fragments.push(Fragment {
            path: path.clone(),
            range: start..text.len(),
        });
        return;
    }
    for (index, child) in el.children.iter().enumerate() {
        if let XmlNode::Element(child_el) = child {
            path.push(index);
            collect(child_el, path, text, fragments);
            path.pop();
        }
    }
}

/// Complement of `remove` (sorted, non-overlapping) within `0..len`.
pub fn complement(len: usize, remove: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut keep = Vec::new();
    let mut pos = 0;
    for range in remove {
        if range.start > pos {
            keep.push(pos..range.start);
        }
        pos = pos.max(range.end);
    }
    if pos < len {
        keep.push(pos..len);
    }
    keep
}

/// Kept intervals of an original string, with erasure expressed in the
/// coordinates of the surviving text.
///
/// The region remover repeatedly matches tags against the surviving text
/// and erases spans of it; this tracks those erasures back to ranges of
/// the original string so one final `rewrite` can apply them.
#[derive(Debug, Clone)]
pub struct KeptText<'a> {
    original: &'a str,
    kept: Vec<Range<usize>>,
}

impl<'a> KeptText<'a> {
    /// Start with the whole string kept.
    pub fn new(original: &'a str) -> Self {
        let kept = if original.is_empty() {
            Vec::new()
        } else {
            vec![0..original.len()]
        };
        Self { original, kept }
    }

    /// The surviving text.
    pub fn current(&self) -> String {
        self.kept
            .iter()
            .map(|r| &self.original[r.clone()])
            .collect()
    }

    /// Remove `range`, expressed in the coordinates of `current()`.
    pub fn erase(&mut self, range: Range<usize>) {
        let mut result = Vec::new();
        let mut offset = 0;
        for r in &self.kept {
            let len = r.end - r.start;
            let lo = range.start.max(offset);
            let hi = range.end.min(offset + len);
            if lo >= hi {
                result.push(r.clone());
            } else {
                if lo > offset {
                    result.push(r.start..r.start + (lo - offset));
                }
                if hi < offset + len {
                    result.push(r.start + (hi - offset)..r.end);
                }
            }
            offset += len;
        }
        self.kept = result;
    }

    /// True if no visible text survives.
    pub fn is_blank(&self) -> bool {
        self.kept
            .iter()
            .all(|r| self.original[r.clone()].trim().is_empty())
    }

    /// The kept ranges in original-string coordinates, sorted and
    /// non-overlapping — ready for [`FlatText::rewrite`].
    pub fn into_ranges(self) -> Vec<Range<usize>> {
        self.kept
    }
}
