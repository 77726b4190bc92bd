//! Byte stream to document tree

use htmlbin_core::registry::{
    self, ATTRIBUTE_CONTENT, ATTRIBUTE_CUSTOM, ELEMENT_COMMENT, ELEMENT_CUSTOM, ELEMENT_END,
    ELEMENT_TEXT, VALUE_ABSENT, VALUE_PRESENT,
};
use htmlbin_core::{Attribute, Document, Element, Node};

use super::{CodeKind, DecodeError};
use crate::options::{Options, StringEncoding};
use crate::MAX_DEPTH;

/// Decode a byte stream produced by [`encode`](super::encode).
///
/// Only `options.string_encoding` is consulted; it must match the encoder's.
pub fn decode(bytes: &[u8], options: &Options) -> Result<Document, DecodeError> {
    let mut decoder = Decoder {
        bytes,
        pos: 0,
        encoding: options.string_encoding,
    };
    let mut nodes = Vec::new();
    while decoder.peek().is_some() {
        nodes.push(decoder.decode_node(1)?);
    }
    Ok(Document::new(nodes))
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    encoding: StringEncoding,
}

impl Decoder<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek().ok_or(DecodeError::Truncated { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read a zero-terminated string
    fn read_string(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        let len = rest.iter().position(|&b| b == 0).ok_or(DecodeError::Truncated {
            offset: self.bytes.len(),
        })?;
        let raw = &rest[..len];
        self.pos += len + 1;

        match self.encoding {
            StringEncoding::Latin1 => Ok(raw.iter().map(|&b| char::from(b)).collect()),
            StringEncoding::Utf8 => std::str::from_utf8(raw)
                .map(str::to_string)
                .map_err(|_| DecodeError::InvalidUtf8 { offset: start }),
        }
    }

    /// Decode one node whose elements would sit at `depth`
    fn decode_node(&mut self, depth: usize) -> Result<Node, DecodeError> {
        let offset = self.pos;
        let code = self.next_byte()?;
        match code {
            ELEMENT_TEXT => return Ok(Node::Text(self.read_string()?)),
            ELEMENT_COMMENT => return Ok(Node::Comment(self.read_string()?)),
            _ if depth > MAX_DEPTH => return Err(DecodeError::TooDeep { offset }),
            _ => {}
        }

        let element = match code {
            ELEMENT_CUSTOM => Element::new(&self.read_string()?),
            code => match registry::element_by_code(code) {
                Some(entry) => Element::new(entry.name),
                None => {
                    return Err(DecodeError::UnrecognizedCode {
                        kind: CodeKind::Element,
                        code,
                        offset,
                    })
                }
            },
        };

        let mut attributes = Vec::new();
        loop {
            let offset = self.pos;
            let name = match self.next_byte()? {
                ATTRIBUTE_CONTENT => break,
                ATTRIBUTE_CUSTOM => self.read_string()?,
                code => registry::attribute_by_code(code)
                    .map(|entry| entry.name.to_string())
                    .ok_or(DecodeError::UnrecognizedCode {
                        kind: CodeKind::Attribute,
                        code,
                        offset,
                    })?,
            };
            attributes.push(self.decode_attribute_value(&name)?);
        }

        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some(ELEMENT_END) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => children.push(self.decode_node(depth + 1)?),
                None => return Err(DecodeError::Truncated { offset: self.pos }),
            }
        }

        Ok(element
            .with_attributes(attributes)
            .with_children(children)
            .into())
    }

    fn decode_attribute_value(&mut self, name: &str) -> Result<Attribute, DecodeError> {
        let offset = self.pos;
        match self.next_byte()? {
            VALUE_ABSENT => Ok(Attribute::new(name, None)),
            VALUE_PRESENT => Ok(Attribute::new(name, Some(self.read_string()?.as_str()))),
            code => Err(DecodeError::UnrecognizedCode {
                kind: CodeKind::ValueMarker,
                code,
                offset,
            }),
        }
    }
}
