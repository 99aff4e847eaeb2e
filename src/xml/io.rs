//! Parsing and serialization of XML parts via quick-xml events.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::node::{Element, XmlNode};
use crate::error::{Error, Result};

/// The XML declaration of a document part.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDecl {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for XmlDecl {
    fn default() -> Self {
        // The declaration Word itself writes for document.xml.
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: Some("yes".to_string()),
        }
    }
}

/// Parse an XML part into its declaration and root element.
pub fn parse(xml: &str) -> Result<(XmlDecl, Element)> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut decl = XmlDecl::default();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Decl(d)) => decl = read_decl(&d)?,
            Ok(Event::Start(e)) => stack.push(element_from_start(&e)?),
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&e)?;
                attach(XmlNode::Element(el), &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| Error::MalformedXml("unexpected closing tag".to_string()))?;
                attach(XmlNode::Element(el), &mut stack, &mut root);
            }
            Ok(Event::Text(t)) => {
                if !stack.is_empty() {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::MalformedXml(e.to_string()))?
                        .into_owned();
                    attach(XmlNode::Text(text), &mut stack, &mut root);
                }
            }
            Ok(Event::CData(c)) => {
                if !stack.is_empty() {
                    let text = String::from_utf8_lossy(c.as_ref()).into_owned();
                    attach(XmlNode::CData(text), &mut stack, &mut root);
                }
            }
            Ok(Event::Comment(c)) => {
                if !stack.is_empty() {
                    let text = String::from_utf8_lossy(c.as_ref()).into_owned();
                    attach(XmlNode::Comment(text), &mut stack, &mut root);
                }
            }
            Ok(Event::Eof) => break,
            // PIs and DOCTYPE do not occur in WordprocessingML parts.
            Ok(_) => {}
            Err(e) => return Err(Error::MalformedXml(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(Error::MalformedXml("unclosed element".to_string()));
    }
    let root = root.ok_or_else(|| Error::MalformedXml("no root element".to_string()))?;
    Ok((decl, root))
}

/// Serialize a declaration and root element back to bytes.
pub fn serialize(decl: &XmlDecl, root: &Element) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new(
        &decl.version,
        decl.encoding.as_deref(),
        decl.standalone.as_deref(),
    )))?;
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &Element) -> Result<()> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if el.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &el.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            XmlNode::CData(t) => writer.write_event(Event::CData(BytesCData::new(t.as_str())))?,
            XmlNode::Comment(t) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(t.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(el.name.as_str())))?;
    Ok(())
}

fn element_from_start(e: &BytesStart) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::MalformedXml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::MalformedXml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn read_decl(d: &BytesDecl) -> Result<XmlDecl> {
    let version = d
        .version()
        .map(|v| String::from_utf8_lossy(&v).into_owned())
        .map_err(|e| Error::MalformedXml(e.to_string()))?;
    let encoding = match d.encoding() {
        Some(enc) => Some(
            enc.map(|v| String::from_utf8_lossy(&v).into_owned())
                .map_err(|e| Error::MalformedXml(e.to_string()))?,
        ),
        None => None,
    };
    let standalone = match d.standalone() {
        Some(sa) => Some(
            sa.map(|v| String::from_utf8_lossy(&v).into_owned())
                .map_err(|e| Error::MalformedXml(e.to_string()))?,
        ),
        None => None,
    };
    Ok(XmlDecl {
        version,
        encoding,
        standalone,
    })
}

fn attach(node: XmlNode, stack: &mut Vec<Element>, root: &mut Option<Element>) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let XmlNode::Element(el) = node {
        if root.is_none() {
            *root = Some(el);
        }
    }
}
