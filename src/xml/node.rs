//! Owned XML tree types.
//!
//! WordprocessingML parts are small enough to hold fully in memory, and the
//! engine mutates nodes in place, so a plain owned tree beats a streaming
//! representation here. Unknown elements and attributes are carried through
//! untouched so formatting survives the round trip.

/// A node in the parsed XML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// An element with its attributes and children.
    Element(Element),
    /// Character data (already unescaped).
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment, stored verbatim.
    Comment(String),
}

impl XmlNode {
    /// Borrow the node as an element, if it is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutably borrow the node as an element, if it is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// An XML element: qualified name, attributes in document order, and
/// ordered children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified name including any namespace prefix, e.g. `w:p`.
    pub name: String,
    /// Attributes as (qualified name, unescaped value) pairs.
    pub attributes: Vec<(String, String)>,
    /// Ordered child nodes.
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Create an empty element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of an attribute by exact qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over child elements only.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First child element with the given qualified name.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Index of the first child element with the given qualified name.
    pub fn find_child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|n| {
            n.as_element().map(|el| el.name == name).unwrap_or(false)
        })
    }

    /// True if any descendant element satisfies the predicate.
    pub fn any_descendant(&self, pred: &dyn Fn(&Element) -> bool) -> bool {
        self.child_elements()
            .any(|el| pred(el) || el.any_descendant(pred))
    }

    /// Walk a path of child indices down to a descendant element.
    ///
    /// Each path step indexes into `children`; a step landing on a
    /// non-element node ends the walk.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut el = self;
        for &idx in path {
            el = el.children.get_mut(idx)?.as_element_mut()?;
        }
        Some(el)
    }

    /// Concatenated direct text and CDATA content of this element.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) | XmlNode::CData(t) => out.push_str(t),
                _ => {}
            }
        }
        out
    }

    /// Replace the element's content with a single text node, or no
    /// children at all when the text is empty.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }
}
