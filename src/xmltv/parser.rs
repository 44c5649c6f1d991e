//! Quick-XML based XMLTV tree parser
//!
//! Builds an owned [`Element`] tree from a whole document so channel and
//! programme elements can be filtered, rewritten and re-emitted with their
//! full payload. Text content is kept in its escaped source form; attribute
//! values are unescaped.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::element::{Element, Node, TAG_CHANNEL, TAG_PROGRAMME};

#[derive(Debug, Error)]
pub enum XmltvParseError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("Invalid UTF-8 in {context}: {source}")]
    Utf8 {
        context: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Malformed document: {0}")]
    Structure(String),
}

/// Channel and programme elements pulled out of a document, in document order
#[derive(Debug, Default)]
pub struct ExtractedElements {
    pub channels: Vec<Element>,
    pub programmes: Vec<Element>,
}

/// Parse a complete XML document and return its root element
pub fn parse_document(content: &str) -> Result<Element, XmltvParseError> {
    let mut reader = Reader::from_str(content);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                stack.push(element_from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| {
                    XmltvParseError::Structure("closing tag without matching opening tag".into())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(e) => {
                let text = utf8(&e, "text")?;
                match stack.last_mut() {
                    Some(parent) => parent.push_child(Node::Text(text.to_string())),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(XmltvParseError::Structure(
                            "text content outside of the root element".into(),
                        ))
                    }
                }
            }
            Event::CData(e) => {
                let text = utf8(&e, "CDATA")?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Node::CData(text.to_string()));
                }
            }
            Event::Comment(e) => {
                let text = utf8(&e, "comment")?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Node::Comment(text.to_string()));
                }
            }
            Event::Eof => break,
            _ => {} // Declarations, processing instructions, doctype
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(XmltvParseError::Structure(format!(
            "unexpected end of document inside <{}>",
            unclosed.name()
        )));
    }

    root.ok_or_else(|| XmltvParseError::Structure("document has no root element".into()))
}

/// Pull every `channel` and `programme` element out of the tree, at any depth
///
/// The root itself is not a candidate, and an element nested inside an
/// already collected element is not collected a second time.
pub fn extract_elements(root: Element) -> ExtractedElements {
    let mut extracted = ExtractedElements::default();
    collect(root, &mut extracted);
    extracted
}

fn collect(parent: Element, out: &mut ExtractedElements) {
    for child in parent.into_children() {
        if let Node::Element(element) = child {
            if element.is(TAG_CHANNEL) {
                out.channels.push(element);
            } else if element.is(TAG_PROGRAMME) {
                out.programmes.push(element);
            } else {
                collect(element, out);
            }
        }
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmltvParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmltvParseError::Structure(format!(
            "unexpected second root element <{}>",
            element.name()
        )));
    }
    *root = Some(element);
    Ok(())
}

fn element_from_start(start: &BytesStart) -> Result<Element, XmltvParseError> {
    let name = start.name();
    let mut element = Element::new(utf8(name.as_ref(), "element name")?);

    for attr in start.attributes() {
        let attr = attr?;
        let key = utf8(attr.key.as_ref(), "attribute name")?.to_string();
        let value = attr.unescape_value()?;
        element.set_attribute(key, value.into_owned());
    }

    Ok(element)
}

fn utf8<'a>(bytes: &'a [u8], context: &'static str) -> Result<&'a str, XmltvParseError> {
    std::str::from_utf8(bytes).map_err(|source| XmltvParseError::Utf8 { context, source })
}
