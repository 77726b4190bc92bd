//! Binary codec for document trees.
//!
//! The stream is a pre-order sequence of node records with no header, length
//! prefix or checksum:
//!
//! ```text
//! text     := 3 string
//! comment  := 2 string
//! element  := code attribute* 2 node* 0        (code = known element code)
//!           | 1 string attribute* 2 node* 0    (custom element, name inline)
//! attribute:= code value                       (code = known attribute code)
//!           | 1 string value                   (custom attribute, name inline)
//! value    := 0 | 1 string
//! string   := byte* 0
//! ```
//!
//! The root node list ends where the buffer ends.

mod decode;
mod encode;
mod extensions;

pub use decode::decode;
pub use encode::{encode, encode_with};
pub use extensions::ExtensionTable;

use std::fmt;

/// What a byte in the stream was expected to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Element,
    Attribute,
    ValueMarker,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CodeKind::Element => "element",
            CodeKind::Attribute => "attribute",
            CodeKind::ValueMarker => "value marker",
        })
    }
}

/// Error raised when a byte stream is malformed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unrecognized {kind} code {code} at offset {offset}")]
    UnrecognizedCode {
        kind: CodeKind,
        code: u8,
        offset: usize,
    },

    #[error("truncated stream at offset {offset}")]
    Truncated { offset: usize },

    #[error("invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("element at offset {offset} nested deeper than {max} levels", max = crate::MAX_DEPTH)]
    TooDeep { offset: usize },
}

/// Error raised when a tree cannot be framed as a byte stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("string contains an embedded NUL character")]
    EmbeddedNul,

    #[error("character {character:?} cannot be encoded as a single byte")]
    Unrepresentable { character: char },

    #[error("element <{element}> nested deeper than {max} levels", max = crate::MAX_DEPTH)]
    TooDeep { element: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;
    use crate::options::{Options, StringEncoding};
    use htmlbin_core::{render, Attribute, Document, Element, Node};

    fn roundtrip(document: &Document, options: &Options) -> Vec<u8> {
        let bytes = encode(document, options).unwrap();
        let decoded = decode(&bytes, options).unwrap();
        assert_eq!(&decoded, document);
        assert_eq!(encode(&decoded, options).unwrap(), bytes);
        bytes
    }

    #[test]
    fn test_paragraph_bytes() {
        let document = parse_html("<p>Hi</p>").unwrap();
        let bytes = roundtrip(&document, &Options::default());
        assert_eq!(bytes, [15, 2, 3, b'H', b'i', 0, 0]);
        assert_eq!(render(&decode(&bytes, &Options::default()).unwrap()), "<p>Hi</p>");
    }

    #[test]
    fn test_attribute_records() {
        let document = parse_html("<a href=\"/\" async></a>").unwrap();
        let bytes = roundtrip(&document, &Options::default());
        assert_eq!(bytes, [11, 3, 1, b'/', 0, 18, 0, 2, 0]);
    }

    #[test]
    fn test_custom_names_are_inline() {
        let document = parse_html("<x-tag data-k=\"v\"></x-tag>").unwrap();
        let bytes = roundtrip(&document, &Options::default());
        let mut expected = vec![1];
        expected.extend_from_slice(b"x-tag\0");
        expected.push(1);
        expected.extend_from_slice(b"data-k\0");
        expected.push(1);
        expected.extend_from_slice(b"v\0");
        expected.extend_from_slice(&[2, 0]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_comment_and_text_records() {
        let document = Document::new(vec![Node::comment("c--"), Node::text(" ")]);
        let bytes = roundtrip(&document, &Options::default());
        assert_eq!(bytes, [2, b'c', b'-', b'-', 0, 3, b' ', 0]);
    }

    #[test]
    fn test_void_element_gains_no_children() {
        let document = parse_html("<br><img src=\"a.png\">").unwrap();
        let bytes = roundtrip(&document, &Options::default());
        let decoded = decode(&bytes, &Options::default()).unwrap();
        for node in decoded.nodes() {
            assert!(node.as_element().unwrap().children().is_empty());
        }
    }

    #[test]
    fn test_full_page_roundtrip() {
        let html = "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
                    <link rel=\"stylesheet\" href=\"s.css\"><style>p > a { color: red }</style>\
                    </head><body><!--[if IE]><p>old</p><![endif]--><nav><ul><li><a href=\"/\">\
                    Home</a></li></ul></nav><my-app v-if=\"ok\"></my-app><script async>\
                    document.write('<p>');</script></body></html>";
        roundtrip(&parse_html(html).unwrap(), &Options::default());
    }

    #[test]
    fn test_empty_document() {
        let bytes = roundtrip(&Document::default(), &Options::default());
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_latin1_text() {
        let document = Document::new(vec![Node::text("café")]);
        let bytes = roundtrip(&document, &Options::default());
        assert_eq!(bytes, [3, b'c', b'a', b'f', 0xE9, 0]);
    }

    #[test]
    fn test_latin1_rejects_wide_characters() {
        let document = Document::new(vec![Node::text("✓")]);
        assert_eq!(
            encode(&document, &Options::default()).unwrap_err(),
            EncodeError::Unrepresentable { character: '✓' }
        );
    }

    #[test]
    fn test_utf8_text() {
        let options = Options {
            string_encoding: StringEncoding::Utf8,
            ..Options::default()
        };
        let document = Document::new(vec![Element::new("p")
            .with_attribute(Attribute::new("title", Some("✓ ok")))
            .with_child(Node::text("héllo 世界"))
            .into()]);
        roundtrip(&document, &options);
    }

    #[test]
    fn test_embedded_nul_is_rejected() {
        let document = Document::new(vec![Node::text("a\0b")]);
        assert_eq!(
            encode(&document, &Options::default()).unwrap_err(),
            EncodeError::EmbeddedNul
        );
    }

    #[test]
    fn test_unrecognized_element_code() {
        let err = decode(&[255, 2, 0], &Options::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnrecognizedCode {
                kind: CodeKind::Element,
                code: 255,
                offset: 0,
            }
        );
        assert!(err.to_string().contains("unrecognized"));
    }

    #[test]
    fn test_retired_codes_are_unrecognized() {
        assert!(matches!(
            decode(&[22, 2, 0], &Options::default()),
            Err(DecodeError::UnrecognizedCode { code: 22, .. })
        ));
        assert!(matches!(
            decode(&[8, 15, 0, 2, 0], &Options::default()),
            Err(DecodeError::UnrecognizedCode {
                kind: CodeKind::Attribute,
                code: 15,
                offset: 1,
            })
        ));
    }

    #[test]
    fn test_bad_value_marker() {
        assert_eq!(
            decode(&[8, 14, 7, 2, 0], &Options::default()).unwrap_err(),
            DecodeError::UnrecognizedCode {
                kind: CodeKind::ValueMarker,
                code: 7,
                offset: 2,
            }
        );
    }

    #[test]
    fn test_truncated_mid_attribute() {
        let document = parse_html("<a href=\"/home\">x</a>").unwrap();
        let bytes = encode(&document, &Options::default()).unwrap();
        for cut in 1..7 {
            let err = decode(&bytes[..cut], &Options::default()).unwrap_err();
            assert!(
                matches!(err, DecodeError::Truncated { .. }),
                "cut at {cut} gave {err:?}"
            );
        }
        assert!(decode(&bytes[..bytes.len() - 1], &Options::default()).is_err());
    }

    #[test]
    fn test_invalid_utf8() {
        let options = Options {
            string_encoding: StringEncoding::Utf8,
            ..Options::default()
        };
        assert_eq!(
            decode(&[3, 0xFF, 0xFE, 0], &options).unwrap_err(),
            DecodeError::InvalidUtf8 { offset: 1 }
        );
    }
}
