//! Final XMLTV document rendering

use std::sync::OnceLock;

use quick_xml::escape::escape;
use regex::Regex;

use crate::config::defaults::DEFAULT_GENERATOR_NAME;
use crate::models::AggregatedDocument;
use crate::xmltv::{render_element, Element};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

struct LinePatterns {
    between_tags: Regex,
    whitespace: Regex,
    before_self_close: Regex,
}

fn line_patterns() -> Option<&'static LinePatterns> {
    static PATTERNS: OnceLock<Option<LinePatterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            Some(LinePatterns {
                between_tags: Regex::new(r">\s+<").ok()?,
                whitespace: Regex::new(r"\s+").ok()?,
                before_self_close: Regex::new(r"\s+/>").ok()?,
            })
        })
        .as_ref()
}

/// Collapse a rendered element onto a single clean line
///
/// Whitespace-only runs between tags are removed, every other whitespace
/// run becomes one space, and the result is trimmed.
pub fn clean_line(rendered: &str) -> String {
    let Some(patterns) = line_patterns() else {
        return rendered.split_whitespace().collect::<Vec<_>>().join(" ");
    };

    let line = patterns.between_tags.replace_all(rendered, "><");
    let line = patterns.whitespace.replace_all(&line, " ");
    let line = patterns.before_self_close.replace_all(&line, "/>");
    line.trim().to_string()
}

/// Writes channels and programmes as an XMLTV document, one element per line
#[derive(Debug, Clone)]
pub struct DocumentSerializer {
    generator_name: String,
}

impl Default for DocumentSerializer {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATOR_NAME)
    }
}

impl DocumentSerializer {
    pub fn new<S: Into<String>>(generator_name: S) -> Self {
        Self {
            generator_name: generator_name.into(),
        }
    }

    pub fn serialize(&self, channels: &[Element], programmes: &[Element]) -> String {
        let mut out = String::with_capacity(128 + (channels.len() + programmes.len()) * 256);

        out.push_str(XML_DECLARATION);
        out.push('\n');
        out.push_str("<tv generator-info-name=\"");
        out.push_str(&escape(self.generator_name.as_str()));
        out.push_str("\">\n");

        for element in channels.iter().chain(programmes) {
            out.push_str("  ");
            out.push_str(&clean_line(&render_element(element)));
            out.push('\n');
        }

        out.push_str("</tv>");
        out
    }

    pub fn serialize_document(&self, document: &AggregatedDocument) -> String {
        self.serialize(&document.channels, &document.programmes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmltv::{extract_elements, parse_document};

    #[test]
    fn test_empty_document() {
        let out = DocumentSerializer::default().serialize(&[], &[]);
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tv generator-info-name=\"EPG Processor\">\n</tv>"
        );
    }

    #[test]
    fn test_one_line_per_element_channels_first() {
        let xml = r#"<tv>
  <programme start="20240101120000 +0000" channel="c1">
    <title>  Morning
      News </title>
  </programme>
  <channel id="c1">
    <display-name>Uno</display-name>
  </channel>
</tv>"#;
        let extracted = extract_elements(parse_document(xml).unwrap());
        let out = DocumentSerializer::default().serialize(&extracted.channels, &extracted.programmes);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], r#"  <channel id="c1"><display-name>Uno</display-name></channel>"#);
        assert_eq!(
            lines[3],
            r#"  <programme start="20240101120000 +0000" channel="c1"><title> Morning News </title></programme>"#
        );
        assert_eq!(lines[4], "</tv>");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_attribute_whitespace_survives_line_cleanup() {
        let xml = r#"<tv><channel id="c1"><icon src="a&#10;b  c"/></channel></tv>"#;
        let extracted = extract_elements(parse_document(xml).unwrap());
        let out = DocumentSerializer::default().serialize(&extracted.channels, &[]);

        // The reference survives; the literal double space still collapses
        assert!(out.contains(r#"  <channel id="c1"><icon src="a&#10;b c"/></channel>"#));
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("  <a>\n   <b/>\n</a>  "), "<a><b/></a>");
        assert_eq!(clean_line("<a>x\t\ty</a>"), "<a>x y</a>");
        assert_eq!(clean_line("<a  />"), "<a/>");
    }

    #[test]
    fn test_custom_generator_name_is_escaped() {
        let out = DocumentSerializer::new("A&B").serialize(&[], &[]);
        assert!(out.contains(r#"<tv generator-info-name="A&amp;B">"#));
    }
}
