//! Owned XMLTV element tree
//!
//! Channels and programmes are kept as generic elements rather than typed
//! structs: the merger only looks at a handful of attributes and must pass
//! everything else (display names, icons, credits, ratings...) through
//! untouched.

pub const TAG_TV: &str = "tv";
pub const TAG_CHANNEL: &str = "channel";
pub const TAG_PROGRAMME: &str = "programme";

pub const ATTR_ID: &str = "id";
pub const ATTR_CHANNEL: &str = "channel";
pub const ATTR_START: &str = "start";
pub const ATTR_STOP: &str = "stop";

/// A child of an [`Element`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data exactly as it appeared in the source, entities still escaped
    Text(String),
    CData(String),
    Comment(String),
}

/// A tag with its attributes and children
///
/// Attribute values are stored unescaped. Attribute order is the order they
/// were read in (or first set), and is preserved on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace an attribute value in place, or append it if absent
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Channel id for `<channel>` elements
    pub fn channel_id(&self) -> Option<&str> {
        self.attribute(ATTR_ID)
    }

    /// Referenced channel for `<programme>` elements
    pub fn programme_channel(&self) -> Option<&str> {
        self.attribute(ATTR_CHANNEL)
    }
}
