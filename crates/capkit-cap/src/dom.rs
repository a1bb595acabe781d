//! Minimal XML element tree over quick-xml
//!
//! The CAP reader only needs four things from an XML library: parse text
//! into a tree, find the first child with a tag name, find all children
//! with a tag name, and take the text of a child. [`TreeQuery`] is that
//! capability; [`Element`] provides it and [`Document`] locates the root.

use crate::error::ParseError;
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;

/// Lookups the CAP reader performs on a parsed XML tree
pub trait TreeQuery {
    /// Local tag name (namespace prefix stripped)
    fn tag(&self) -> &str;

    /// Child elements in document order
    fn child_elements<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Self> + 'a>;

    /// Character data directly inside this node, unescaped
    fn text(&self) -> String;

    fn first_child(&self, name: &str) -> Option<&Self> {
        self.child_elements().find(|child| child.tag() == name)
    }

    fn children_named<'a>(&'a self, name: &str) -> Vec<&'a Self> {
        self.child_elements()
            .filter(|child| child.tag() == name)
            .collect()
    }

    /// Text of the first child called `name`, or `""` when there is none
    fn child_text(&self, name: &str) -> String {
        self.first_child(name)
            .map(|child| child.text())
            .unwrap_or_default()
    }
}

/// A parsed XML document: its top-level elements
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    elements: Vec<Element>,
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

impl Document {
    /// Parse XML text into a tree.
    ///
    /// Declarations, comments, processing instructions and DOCTYPE are
    /// dropped. Whitespace is kept as-is. Mismatched or unclosed tags are
    /// errors.
    pub fn parse(xml: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut open: Vec<Element> = Vec::new();
        let mut elements = Vec::new();

        loop {
            match reader.read_event()? {
                XmlEvent::Start(e) => open.push(Element::from_start(&e)?),
                XmlEvent::Empty(e) => {
                    let element = Element::from_start(&e)?;
                    attach(&mut open, &mut elements, element);
                }
                // The reader checks end names, so an End always has an open element
                XmlEvent::End(_) => {
                    if let Some(element) = open.pop() {
                        attach(&mut open, &mut elements, element);
                    }
                }
                XmlEvent::Text(e) => {
                    if let Some(parent) = open.last_mut() {
                        parent.push_text(&e.unescape()?);
                    }
                }
                XmlEvent::CData(e) => {
                    if let Some(parent) = open.last_mut() {
                        let text = String::from_utf8(e.into_inner().into_owned())?;
                        parent.push_text(&text);
                    }
                }
                XmlEvent::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = open.last() {
            return Err(ParseError::UnclosedElement(element.name.clone()));
        }

        Ok(Self { elements })
    }

    /// The first top-level element called `name`
    pub fn find_root(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.name == name)
    }
}

fn attach(open: &mut [Element], elements: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => elements.push(element),
    }
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Attribute value by its qualified name (e.g. `xmlns`)
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Default namespace declared on this element
    pub fn namespace(&self) -> Option<&str> {
        self.attribute("xmlns")
    }

    /// Builder-style: append a child element
    pub fn with_child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    /// Builder-style: append character data
    pub fn with_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }

    /// Append character data, merging with a preceding text node
    pub fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

impl TreeQuery for Element {
    fn tag(&self) -> &str {
        &self.name
    }

    fn child_elements<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Self> + 'a> {
        Box::new(self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }))
    }

    fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}
