//! Markup rendering
//!
//! Converts a document tree back into markup text. The output re-parses to
//! the same tree but is not byte-identical to the original source: quoting is
//! chosen here and empty elements always get an explicit close tag.

use std::fmt;

use crate::ast::{Attribute, Document, Element, Node};
use crate::registry::ElementKind;

/// Render a whole document
pub fn render(document: &Document) -> String {
    let mut out = String::with_capacity(4096);
    for node in document.nodes() {
        write_node(node, &mut out);
    }
    out
}

/// Render a single node and its subtree
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => write_element(element, out),
        Node::Text(text) => out.push_str(text),
        Node::Comment(value) => {
            out.push_str("<!");
            out.push_str(value);
            out.push('>');
        }
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.name());
    for attribute in element.attributes() {
        out.push(' ');
        write_attribute(attribute, out);
    }
    out.push('>');

    if element.children().is_empty() && element.kind() == ElementKind::Void {
        return;
    }

    // Text-only bodies are a single raw text child, so the generic path
    // already emits them verbatim.
    for child in element.children() {
        write_node(child, out);
    }

    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn write_attribute(attribute: &Attribute, out: &mut String) {
    out.push_str(attribute.name());
    if let Some(value) = attribute.value() {
        let quote = if value.contains('"') { '\'' } else { '"' };
        out.push('=');
        out.push(quote);
        out.push_str(value);
        out.push(quote);
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_node(self))
    }
}
