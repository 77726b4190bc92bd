//! htmlbin-core - document model, vocabulary registry and rendering
//!
//! This crate provides the data structures shared by the `htmlbin` parser and
//! binary codec, the static vocabulary tables that give known element and
//! attribute names their wire codes, and the renderer that turns a document
//! back into markup.
//!
//! # Architecture
//!
//! ```text
//! markup ──parse──▶ ┌──────────┐ ──encode──▶ bytes
//!                   │ Document │
//! markup ◀─render── └──────────┘ ◀─decode── bytes
//! ```
//!
//! # Example
//!
//! ```rust
//! use htmlbin_core::{render, Attribute, Document, Element, Node};
//!
//! let link = Element::new("a")
//!     .with_attribute(Attribute::new("href", Some("/home")))
//!     .with_child(Node::text("Home"));
//!
//! let document = Document::new(vec![link.into()]);
//! assert_eq!(render(&document), "<a href=\"/home\">Home</a>");
//! ```

mod ast;
pub mod registry;
mod render;

pub use ast::{Attribute, Descendants, Document, Element, Node};
pub use registry::{ElementKind, Vocabulary};
pub use render::{render, render_node};
