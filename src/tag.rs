//! Tag lexicon: typed recognition of the bracket-tag vocabulary.
//!
//! Five literal markers can appear inside document text:
//! `[[BLOCK_START<digits>]]`, `[[BLOCK_END]]`, `[[SECTION_START<digits>]]`,
//! `[[SECTION_END]]` and `[[ROW<digits>]]`. The lexicon turns raw text into
//! typed matches (kind + label + byte range) so the region state machine
//! drives off typed events instead of re-matching strings.

use std::ops::Range;

use regex::Regex;

/// The tag kinds embedded in document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    BlockStart,
    BlockEnd,
    SectionStart,
    SectionEnd,
    Row,
}

impl TagKind {
    /// True for kinds that carry a numeric label.
    pub fn labeled(self) -> bool {
        matches!(self, TagKind::BlockStart | TagKind::SectionStart | TagKind::Row)
    }
}

/// The two START/END tag families. A START never pairs with an END of the
/// other family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFamily {
    Block,
    Section,
}

impl TagFamily {
    /// The family's opening tag kind.
    pub fn start_kind(self) -> TagKind {
        match self {
            TagFamily::Block => TagKind::BlockStart,
            TagFamily::Section => TagKind::SectionStart,
        }
    }

    /// The family's closing tag kind.
    pub fn end_kind(self) -> TagKind {
        match self {
            TagFamily::Block => TagKind::BlockEnd,
            TagFamily::Section => TagKind::SectionEnd,
        }
    }

    /// Display name for logs and warnings.
    pub fn name(self) -> &'static str {
        match self {
            TagFamily::Block => "BLOCK",
            TagFamily::Section => "SECTION",
        }
    }
}

/// One recognized tag occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMatch {
    pub kind: TagKind,
    /// Digit-string label; `None` for END kinds.
    pub label: Option<String>,
    /// Byte range of the whole marker, brackets included.
    pub range: Range<usize>,
}

const BLOCK_END_LITERAL: &str = "[[BLOCK_END]]";
const SECTION_END_LITERAL: &str = "[[SECTION_END]]";

/// Compiled recognizers for the tag vocabulary.
pub struct TagLexicon {
    block_start: Regex,
    section_start: Regex,
    row: Regex,
    any: Regex,
}

impl TagLexicon {
    pub fn new() -> Self {
        Self {
            block_start: Regex::new(r"\[\[BLOCK_START(\d+)\]\]").unwrap(),
            section_start: Regex::new(r"\[\[SECTION_START(\d+)\]\]").unwrap(),
            row: Regex::new(r"\[\[ROW(\d+)\]\]").unwrap(),
            any: Regex::new(
                r"\[\[(?:BLOCK_START\d+|BLOCK_END|SECTION_START\d+|SECTION_END|ROW\d+)\]\]",
            )
            .unwrap(),
        }
    }

    /// First occurrence of `kind` in `text`. For labeled kinds, `label`
    /// restricts the search to an exact digit-string match; `None` accepts
    /// any label.
    pub fn find(&self, text: &str, kind: TagKind, label: Option<&str>) -> Option<TagMatch> {
        self.find_at(text, kind, label, 0)
    }

    /// Like [`find`](Self::find), starting at byte offset `from`.
    pub fn find_at(
        &self,
        text: &str,
        kind: TagKind,
        label: Option<&str>,
        from: usize,
    ) -> Option<TagMatch> {
        match kind {
            TagKind::BlockEnd => find_literal(text, BLOCK_END_LITERAL, kind, from),
            TagKind::SectionEnd => find_literal(text, SECTION_END_LITERAL, kind, from),
            TagKind::BlockStart => find_labeled(&self.block_start, text, kind, label, from),
            TagKind::SectionStart => find_labeled(&self.section_start, text, kind, label, from),
            TagKind::Row => find_labeled(&self.row, text, kind, label, from),
        }
    }

    /// Every tag occurrence of every kind and label, in text order.
    pub fn scan_all(&self, text: &str) -> Vec<TagMatch> {
        self.any
            .find_iter(text)
            .map(|m| classify(m.as_str(), m.range()))
            .collect()
    }
}

impl Default for TagLexicon {
    fn default() -> Self {
        Self::new()
    }
}

fn find_literal(text: &str, needle: &str, kind: TagKind, from: usize) -> Option<TagMatch> {
    text.get(from..)?.find(needle).map(|pos| TagMatch {
        kind,
        label: None,
        range: from + pos..from + pos + needle.len(),
    })
}

fn find_labeled(
    re: &Regex,
    text: &str,
    kind: TagKind,
    label: Option<&str>,
    from: usize,
) -> Option<TagMatch> {
    let slice = text.get(from..)?;
    for caps in re.captures_iter(slice) {
        let got = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if label.is_some_and(|want| want != got) {
            continue;
        }
        if let Some(whole) = caps.get(0) {
            return Some(TagMatch {
                kind,
                label: Some(got.to_string()),
                range: from + whole.start()..from + whole.end(),
            });
        }
    }
    None
}

fn classify(marker: &str, range: Range<usize>) -> TagMatch {
    let inner = marker.trim_start_matches("[[").trim_end_matches("]]");
    let (kind, label) = if let Some(digits) = inner.strip_prefix("BLOCK_START") {
        (TagKind::BlockStart, Some(digits.to_string()))
    } else if let Some(digits) = inner.strip_prefix("SECTION_START") {
        (TagKind::SectionStart, Some(digits.to_string()))
    } else if let Some(digits) = inner.strip_prefix("ROW") {
        (TagKind::Row, Some(digits.to_string()))
    } else if inner == "BLOCK_END" {
        (TagKind::BlockEnd, None)
    } else {
        (TagKind::SectionEnd, None)
    };
    TagMatch { kind, label, range }
}
