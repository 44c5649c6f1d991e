//! Element to XML text rendering

use quick_xml::escape::escape;

use super::element::{Element, Node};

/// Render an element and its subtree as XML text
///
/// Attribute values are escaped, with tab, newline and carriage return as
/// character references so they survive whitespace cleanup; text nodes are emitted as stored, which is
/// already their escaped form. Childless elements are self-closed.
pub fn render_element(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for (key, value) in element.attributes() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        push_attribute_value(value, out);
        out.push('"');
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in element.children() {
        match child {
            Node::Element(inner) => write_element(inner, out),
            Node::Text(text) => out.push_str(text),
            Node::CData(text) => {
                out.push_str("<![CDATA[");
                out.push_str(text);
                out.push_str("]]>");
            }
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn push_attribute_value(value: &str, out: &mut String) {
    for ch in escape(value).chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            other => out.push(other),
        }
    }
}
