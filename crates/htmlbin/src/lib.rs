//! # htmlbin
//!
//! Convert markup to a compact binary stream and back.
//!
//! Markup is parsed into the [`Document`] tree from `htmlbin-core`, encoded
//! with one-byte codes for known element and attribute names, and optionally
//! gzip-compressed. Unpacking reverses each step.
//!
//! ## Design
//!
//! - **Stable wire codes**: known vocabulary maps to fixed codes; anything
//!   else is written inline after a reserved "custom" code, so decoding never
//!   depends on encoder state.
//! - **Exact framing**: `decode(encode(d)) == d`, and re-encoding a decoded
//!   stream reproduces the same bytes.
//! - **No recovery**: malformed markup or streams fail with a typed error and
//!   no partial result.
//! - **Bounded nesting**: elements nested deeper than [`MAX_DEPTH`] are
//!   rejected by every stage.
//!
//! ## Example
//!
//! ```rust
//! use htmlbin::HtmlBinService;
//!
//! let service = HtmlBinService::new();
//! let packed = service.pack("<p class=\"note\">Hello</p>").unwrap();
//! let html = service.unpack_html(&packed).unwrap();
//! assert_eq!(html, "<p class=\"note\">Hello</p>");
//! ```
//!
//! ## Example (codec only)
//!
//! ```rust
//! use htmlbin::{decode, encode, parse_html, Options};
//!
//! let document = parse_html("<p>Hi</p>").unwrap();
//! let bytes = encode(&document, &Options::default()).unwrap();
//! assert_eq!(bytes, [15, 2, 3, b'H', b'i', 0, 0]);
//! assert_eq!(decode(&bytes, &Options::default()).unwrap(), document);
//! ```

pub mod codec;
pub mod compress;
pub mod html;
mod options;
mod service;

pub use codec::{decode, encode, encode_with, CodeKind, DecodeError, EncodeError, ExtensionTable};
#[cfg(feature = "gzip")]
pub use compress::Gzip;
pub use compress::{Compressor, Identity};
pub use html::{parse_html, ParseError, Parser};
pub use options::{Options, StringEncoding};
pub use service::HtmlBinService;

pub use htmlbin_core::{render, Attribute, Document, Element, ElementKind, Node, Vocabulary};

/// Deepest element nesting accepted by the parser, encoder and decoder.
///
/// Root elements are at depth 1. Trees are walked recursively, so this bounds
/// stack use on untrusted input.
pub const MAX_DEPTH: usize = 256;

/// Error type for htmlbin operations
#[derive(Debug, thiserror::Error)]
pub enum HtmlBinError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("compression error: {0}")]
    Compression(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HtmlBinError>;
