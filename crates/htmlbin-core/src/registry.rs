//! Vocabulary registry
//!
//! Static tables mapping known element and attribute names to the one-byte
//! codes used on the wire. The codes are a stable format: entries may be
//! appended, but a code is never reassigned once it has been used. Codes 22
//! (elements) and 15 (attributes) are retired.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Terminates the child list of an element.
pub const ELEMENT_END: u8 = 0;
/// Element whose name follows inline as a string.
pub const ELEMENT_CUSTOM: u8 = 1;
/// Comment node, payload follows as a string.
pub const ELEMENT_COMMENT: u8 = 2;
/// Text node, payload follows as a string.
pub const ELEMENT_TEXT: u8 = 3;

/// Attribute whose name follows inline as a string.
pub const ATTRIBUTE_CUSTOM: u8 = 1;
/// Terminates the attribute list; the element's content follows.
pub const ATTRIBUTE_CONTENT: u8 = 2;

/// Attribute record without a value.
pub const VALUE_ABSENT: u8 = 0;
/// Attribute record followed by its value string.
pub const VALUE_PRESENT: u8 = 1;

/// Which of the two independent tables a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Element,
    Attribute,
}

/// Structural classification of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementKind {
    /// Ordinary element with parsed children
    #[default]
    Normal,
    /// Never carries children, closes on a bare `>` (e.g. `br`)
    Void,
    /// Body is kept verbatim as a single text node (e.g. `script`)
    TextOnly,
}

/// A statically known element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementEntry {
    pub name: &'static str,
    pub code: u8,
    pub kind: ElementKind,
}

/// A statically known attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeEntry {
    pub name: &'static str,
    pub code: u8,
}

const fn element(name: &'static str, code: u8, kind: ElementKind) -> ElementEntry {
    ElementEntry { name, code, kind }
}

const fn attribute(name: &'static str, code: u8) -> AttributeEntry {
    AttributeEntry { name, code }
}

use ElementKind::{Normal, TextOnly, Void};

/// Known elements, ordered by code
pub static ELEMENTS: &[ElementEntry] = &[
    element("!doctype", 4, Void),
    element("html", 5, Normal),
    element("head", 6, Normal),
    element("body", 7, Normal),
    element("div", 8, Normal),
    element("script", 9, TextOnly),
    element("style", 10, TextOnly),
    element("a", 11, Normal),
    element("title", 12, Normal),
    element("header", 13, Normal),
    element("h1", 14, Normal),
    element("p", 15, Normal),
    element("ul", 16, Normal),
    element("li", 17, Normal),
    element("meta", 18, Void),
    element("br", 19, Void),
    element("link", 20, Void),
    element("img", 21, Void),
    element("span", 23, Normal),
    element("i", 24, Normal),
    element("nav", 25, Normal),
    element("h4", 26, Normal),
    element("h3", 27, Normal),
    element("h2", 28, Normal),
    element("strong", 29, Normal),
    element("iframe", 30, Normal),
    element("footer", 31, Normal),
];

/// Known attributes, ordered by code
pub static ATTRIBUTES: &[AttributeEntry] = &[
    attribute("href", 3),
    attribute("html", 4),
    attribute("lang", 5),
    attribute("class", 6),
    attribute("charset", 7),
    attribute("name", 8),
    attribute("src", 9),
    attribute("content", 10),
    attribute("style", 11),
    attribute("onclick", 12),
    attribute("target", 13),
    attribute("id", 14),
    attribute("rel", 16),
    attribute("type", 17),
    attribute("async", 18),
    attribute("title", 19),
    attribute("alt", 20),
];

static ELEMENT_NAMES: Lazy<HashMap<&'static str, &'static ElementEntry>> =
    Lazy::new(|| ELEMENTS.iter().map(|e| (e.name, e)).collect());

static ELEMENT_CODES: Lazy<HashMap<u8, &'static ElementEntry>> =
    Lazy::new(|| ELEMENTS.iter().map(|e| (e.code, e)).collect());

static ATTRIBUTE_NAMES: Lazy<HashMap<&'static str, &'static AttributeEntry>> =
    Lazy::new(|| ATTRIBUTES.iter().map(|a| (a.name, a)).collect());

static ATTRIBUTE_CODES: Lazy<HashMap<u8, &'static AttributeEntry>> =
    Lazy::new(|| ATTRIBUTES.iter().map(|a| (a.code, a)).collect());

/// Look a name up in a table keyed by lower-case names
fn lookup<T: Copy>(table: &HashMap<&'static str, T>, name: &str) -> Option<T> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        table.get(name.to_ascii_lowercase().as_str()).copied()
    } else {
        table.get(name).copied()
    }
}

/// Find a known element by name (case-insensitive)
pub fn element_entry(name: &str) -> Option<&'static ElementEntry> {
    lookup(&ELEMENT_NAMES, name)
}

/// Find a known element by wire code
pub fn element_by_code(code: u8) -> Option<&'static ElementEntry> {
    ELEMENT_CODES.get(&code).copied()
}

/// Find a known attribute by name (case-insensitive)
pub fn attribute_entry(name: &str) -> Option<&'static AttributeEntry> {
    lookup(&ATTRIBUTE_NAMES, name)
}

/// Find a known attribute by wire code
pub fn attribute_by_code(code: u8) -> Option<&'static AttributeEntry> {
    ATTRIBUTE_CODES.get(&code).copied()
}

/// Map a name to its wire code, or the custom code if it is not known
pub fn identifier_to_code(vocabulary: Vocabulary, name: &str) -> u8 {
    match vocabulary {
        Vocabulary::Element => element_entry(name).map_or(ELEMENT_CUSTOM, |e| e.code),
        Vocabulary::Attribute => attribute_entry(name).map_or(ATTRIBUTE_CUSTOM, |a| a.code),
    }
}

/// Map a wire code back to its canonical name.
///
/// Returns `None` for reserved codes (including the custom code, whose name
/// travels inline) and for codes that were never assigned.
pub fn code_to_identifier(vocabulary: Vocabulary, code: u8) -> Option<&'static str> {
    match vocabulary {
        Vocabulary::Element => element_by_code(code).map(|e| e.name),
        Vocabulary::Attribute => attribute_by_code(code).map(|a| a.name),
    }
}

/// Highest code assigned in a table
pub fn max_code(vocabulary: Vocabulary) -> u8 {
    match vocabulary {
        Vocabulary::Element => ELEMENTS.iter().map(|e| e.code).max().unwrap_or(ELEMENT_TEXT),
        Vocabulary::Attribute => ATTRIBUTES
            .iter()
            .map(|a| a.code)
            .max()
            .unwrap_or(ATTRIBUTE_CONTENT),
    }
}
