//! XMLTV document model
//!
//! Parsing into an owned element tree, extraction of `channel`/`programme`
//! elements, and rendering back to text.

pub mod element;
pub mod parser;
pub mod writer;

pub use element::{Element, Node};
pub use parser::{extract_elements, parse_document, ExtractedElements, XmltvParseError};
pub use writer::render_element;
