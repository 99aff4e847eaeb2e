//! The parsed document part and block-level node helpers.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::xml::{self, Element, XmlDecl, XmlNode};

/// Kind of a block-level body child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A `w:p` element.
    Paragraph,
    /// A `w:tbl` element.
    Table,
}

/// A parsed `word/document.xml` part.
///
/// The tree is mutated in place by the pipeline; nodes are only ever
/// trimmed or deleted, never duplicated or reparented.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    decl: XmlDecl,
    root: Element,
    body_index: usize,
}

impl DocxDocument {
    /// Parse the document part from raw bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::MalformedXml(format!("part is not UTF-8: {}", e)))?;
        let (decl, root) = xml::parse(text)?;
        if root.name != "w:document" {
            return Err(Error::MalformedXml(format!(
                "unexpected root element <{}>",
                root.name
            )));
        }
        let body_index = root
            .find_child_index("w:body")
            .ok_or_else(|| Error::MalformedXml("missing <w:body>".to_string()))?;
        Ok(Self {
            decl,
            root,
            body_index,
        })
    }

    /// The document body.
    pub fn body(&self) -> &Element {
        match &self.root.children[self.body_index] {
            XmlNode::Element(el) => el,
            _ => unreachable!("body index validated at parse"),
        }
    }

    /// The document body, mutable.
    pub fn body_mut(&mut self) -> &mut Element {
        match &mut self.root.children[self.body_index] {
            XmlNode::Element(el) => el,
            _ => unreachable!("body index validated at parse"),
        }
    }

    /// Serialize the part back to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        xml::serialize(&self.decl, &self.root)
    }
}

/// View a body child as a block-level node, if it is one.
pub fn as_block(node: &XmlNode) -> Option<(BlockKind, &Element)> {
    let el = node.as_element()?;
    match el.name.as_str() {
        "w:p" => Some((BlockKind::Paragraph, el)),
        "w:tbl" => Some((BlockKind::Table, el)),
        _ => None,
    }
}

/// True if the paragraph carries an explicit page break or ends a layout
/// section (a paragraph-level `w:sectPr`).
pub fn has_break_marker(el: &Element) -> bool {
    if el.name != "w:p" {
        return false;
    }
    el.any_descendant(&|d| {
        (d.name == "w:br" && d.attribute("w:type") == Some("page")) || d.name == "w:sectPr"
    })
}

/// True if the paragraph embeds a drawing or legacy picture.
pub fn has_graphic(el: &Element) -> bool {
    el.any_descendant(&|d| d.name == "w:drawing" || d.name == "w:pict")
}

/// Delete the given child indices in one pass, preserving survivor order.
pub fn remove_children(el: &mut Element, indices: &BTreeSet<usize>) {
    if indices.is_empty() {
        return;
    }
    let mut current = 0;
    el.children.retain(|_| {
        let keep = !indices.contains(&current);
        current += 1;
        keep
    });
}
