//! Document tree to byte stream

use htmlbin_core::registry::{
    self, ATTRIBUTE_CONTENT, ATTRIBUTE_CUSTOM, ELEMENT_COMMENT, ELEMENT_CUSTOM, ELEMENT_END,
    ELEMENT_TEXT, VALUE_ABSENT, VALUE_PRESENT,
};
use htmlbin_core::{Attribute, Document, Element, Node, Vocabulary};

use super::{EncodeError, ExtensionTable};
use crate::options::{Options, StringEncoding};
use crate::MAX_DEPTH;

/// Encode a document into a byte stream.
///
/// Custom names are tracked in a table local to this call; use
/// [`encode_with`] to accumulate them across calls.
pub fn encode(document: &Document, options: &Options) -> Result<Vec<u8>, EncodeError> {
    let mut extensions = ExtensionTable::new();
    encode_with(document, options, &mut extensions)
}

/// Encode a document, registering custom names into `extensions`
pub fn encode_with(
    document: &Document,
    options: &Options,
    extensions: &mut ExtensionTable,
) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder {
        out: Vec::with_capacity(1024),
        options,
        extensions,
    };
    for node in document.nodes() {
        encoder.encode_node(node, 1)?;
    }
    Ok(encoder.out)
}

struct Encoder<'a> {
    out: Vec<u8>,
    options: &'a Options,
    extensions: &'a mut ExtensionTable,
}

impl Encoder<'_> {
    fn encode_node(&mut self, node: &Node, depth: usize) -> Result<(), EncodeError> {
        match node {
            Node::Element(element) => self.encode_element(element, depth),
            Node::Text(text) => {
                self.out.push(ELEMENT_TEXT);
                self.write_string(text)
            }
            Node::Comment(value) => {
                self.out.push(ELEMENT_COMMENT);
                self.write_string(value)
            }
        }
    }

    fn encode_element(&mut self, element: &Element, depth: usize) -> Result<(), EncodeError> {
        if depth > MAX_DEPTH {
            return Err(EncodeError::TooDeep {
                element: element.name().to_string(),
            });
        }

        let code = registry::identifier_to_code(Vocabulary::Element, element.name());
        self.out.push(code);
        if code == ELEMENT_CUSTOM {
            self.write_string(element.name())?;
            self.note_custom(Vocabulary::Element, element.name());
        }

        for attribute in element.attributes() {
            self.encode_attribute(attribute)?;
        }
        self.out.push(ATTRIBUTE_CONTENT);

        for child in element.children() {
            self.encode_node(child, depth + 1)?;
        }
        self.out.push(ELEMENT_END);
        Ok(())
    }

    fn encode_attribute(&mut self, attribute: &Attribute) -> Result<(), EncodeError> {
        let code = registry::identifier_to_code(Vocabulary::Attribute, attribute.name());
        self.out.push(code);
        if code == ATTRIBUTE_CUSTOM {
            self.write_string(attribute.name())?;
            self.note_custom(Vocabulary::Attribute, attribute.name());
        }

        match attribute.value() {
            None => self.out.push(VALUE_ABSENT),
            Some(value) => {
                self.out.push(VALUE_PRESENT);
                self.write_string(value)?;
            }
        }
        Ok(())
    }

    fn note_custom(&mut self, vocabulary: Vocabulary, name: &str) {
        if self.extensions.register(vocabulary, name) && self.options.report_custom_identifiers {
            match vocabulary {
                Vocabulary::Element => log::warn!("custom element <{name}> encoded"),
                Vocabulary::Attribute => log::warn!("custom attribute '{name}' encoded"),
            }
        }
    }

    /// Write a zero-terminated string
    fn write_string(&mut self, s: &str) -> Result<(), EncodeError> {
        match self.options.string_encoding {
            StringEncoding::Latin1 => {
                self.out.reserve(s.len() + 1);
                for c in s.chars() {
                    let byte = u8::try_from(c)
                        .map_err(|_| EncodeError::Unrepresentable { character: c })?;
                    if byte == 0 {
                        return Err(EncodeError::EmbeddedNul);
                    }
                    self.out.push(byte);
                }
            }
            StringEncoding::Utf8 => {
                if s.contains('\0') {
                    return Err(EncodeError::EmbeddedNul);
                }
                self.out.extend_from_slice(s.as_bytes());
            }
        }
        self.out.push(0);
        Ok(())
    }
}
