//! Document model
//!
//! The tree built by the parser and the decoder and consumed by the renderer
//! and the encoder. Known element and attribute names are normalized to their
//! canonical lower-case spelling on construction, and an element's kind is
//! always taken from the registry, so a tree cannot disagree with the wire
//! format about either.

use crate::registry::{self, ElementKind};

/// A node in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children
    Element(Element),

    /// Raw text, never interpreted as markup
    Text(String),

    /// Comment body, including any conditional-comment decoration
    Comment(String),
}

impl Node {
    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    /// Create a new comment node
    pub fn comment(value: &str) -> Self {
        Node::Comment(value.to_string())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element: name, ordered attributes and ordered children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    kind: ElementKind,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children.
    ///
    /// A known name is stored in its canonical form (`DIV` becomes `div`);
    /// any other name is kept exactly as given and classified as normal.
    pub fn new(name: &str) -> Self {
        let (name, kind) = match registry::element_entry(name) {
            Some(entry) => (entry.name.to_string(), entry.kind),
            None => (name.to_string(), ElementKind::Normal),
        };
        Self {
            name,
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// True if the name is not in the static registry
    pub fn is_custom(&self) -> bool {
        registry::element_entry(&self.name).is_none()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// An attribute: a name and an optional value.
///
/// `<input disabled>` has no value, which is distinct from
/// `<input value="">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: Option<String>,
}

impl Attribute {
    /// Create an attribute, normalizing a known name to lower case
    pub fn new(name: &str, value: Option<&str>) -> Self {
        let name = match registry::attribute_entry(name) {
            Some(entry) => entry.name.to_string(),
            None => name.to_string(),
        };
        Self {
            name,
            value: value.map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// True if the name is not in the static registry
    pub fn is_custom(&self) -> bool {
        registry::attribute_entry(&self.name).is_none()
    }
}

/// A parsed document: an ordered list of root nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node in document order (pre-order)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.nodes.iter().rev().collect(),
        }
    }
}

impl From<Vec<Node>> for Document {
    fn from(nodes: Vec<Node>) -> Self {
        Self::new(nodes)
    }
}

/// Pre-order iterator over a document's nodes
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Element(element) = node {
            self.stack.extend(element.children.iter().rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_element_is_normalized() {
        let element = Element::new("DIV");
        assert_eq!(element.name(), "div");
        assert_eq!(element.kind(), ElementKind::Normal);
        assert!(!element.is_custom());
    }

    #[test]
    fn test_element_kind_comes_from_registry() {
        assert_eq!(Element::new("br").kind(), ElementKind::Void);
        assert_eq!(Element::new("Script").kind(), ElementKind::TextOnly);
    }

    #[test]
    fn test_custom_element_keeps_its_spelling() {
        let element = Element::new("My-Widget");
        assert_eq!(element.name(), "My-Widget");
        assert_eq!(element.kind(), ElementKind::Normal);
        assert!(element.is_custom());
    }

    #[test]
    fn test_attribute_presence_differs_from_empty_value() {
        let flag = Attribute::new("async", None);
        let empty = Attribute::new("async", Some(""));
        assert_eq!(flag.value(), None);
        assert_eq!(empty.value(), Some(""));
        assert_ne!(flag, empty);
    }

    #[test]
    fn test_attribute_name_normalization() {
        assert_eq!(Attribute::new("CLASS", None).name(), "class");
        assert_eq!(Attribute::new("data-X", None).name(), "data-X");
        assert!(Attribute::new("data-X", None).is_custom());
    }

    #[test]
    fn test_descendants_pre_order() {
        let document = Document::new(vec![
            Element::new("div")
                .with_child(Element::new("span").with_child(Node::text("a")).into())
                .with_child(Node::text("b"))
                .into(),
            Node::comment("c"),
        ]);
        let kinds: Vec<String> = document
            .descendants()
            .map(|n| match n {
                Node::Element(e) => e.name().to_string(),
                Node::Text(t) => format!("#{t}"),
                Node::Comment(c) => format!("!{c}"),
            })
            .collect();
        assert_eq!(kinds, ["div", "span", "#a", "#b", "!c"]);
    }
}
