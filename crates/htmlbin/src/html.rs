//! Markup parsing.
//!
//! A small recursive-descent parser that turns markup text into the
//! [`Document`] tree. It is deliberately tolerant about what it accepts
//! (no validation of names or nesting beyond matching close tags) and
//! deliberately strict about structure: the first violation aborts the whole
//! parse, there is no error recovery and no partial document.
//!
//! Notable behavior:
//!
//! - Text runs, including whitespace-only runs between tags, are kept as
//!   text nodes exactly as written. No entity decoding is performed.
//! - `script` and `style` bodies are captured verbatim up to the first
//!   `</name` written with the same spelling as the open tag.
//! - Comments keep the terminator characters they consume: `<!--note-->`
//!   yields the payload `note--`, and the conditional form `<!--[if IE]>`
//!   yields `[if IE]`.
//! - A self-closing tag must end in exactly `/>`. Anything between the two
//!   characters, as in `<br/ >`, is an error rather than being skipped.
//! - A self-closing `<script/>` or `<style/>` still gets its single, empty
//!   text body.
//! - Elements nested deeper than [`MAX_DEPTH`] fail with
//!   [`ParseError::TooDeep`].

use htmlbin_core::{Attribute, Document, Element, ElementKind, Node};

use crate::MAX_DEPTH;

const COMMENT_OPEN: &str = "!--";
const ENDIF_OPEN: &str = "![endif]";
const COMMENT_CLOSE: &str = "-->";
const CONDITIONAL_CLOSE: &str = "]>";

/// Error raised when markup cannot be parsed.
///
/// Every variant carries the byte offset into the input where the problem
/// was detected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("identifier expected at offset {offset}")]
    IdentifierExpected { offset: usize },

    #[error("unexpected character {found:?} at offset {offset} (expected {expected})")]
    UnexpectedChar {
        found: char,
        expected: &'static str,
        offset: usize,
    },

    #[error("unexpected closing identifier </{found}> at offset {offset}, </{expected}> expected")]
    UnexpectedClosingIdentifier {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("unexpected end of input at offset {offset} inside <{element}>")]
    UnexpectedEof { element: String, offset: usize },

    #[error("unterminated attribute value starting at offset {offset}")]
    UnterminatedQuote { offset: usize },

    #[error("unterminated comment starting at offset {offset}")]
    UnterminatedComment { offset: usize },

    #[error("element at offset {offset} nested deeper than {max} levels", max = MAX_DEPTH)]
    TooDeep { offset: usize },
}

/// Parse a markup string into a [`Document`].
///
/// # Example
///
/// ```rust
/// use htmlbin::parse_html;
/// use htmlbin_core::Node;
///
/// let document = parse_html("<p>Hi</p>").unwrap();
/// let p = document.nodes()[0].as_element().unwrap();
/// assert_eq!(p.name(), "p");
/// assert_eq!(p.children(), &[Node::text("Hi")]);
/// ```
pub fn parse_html(html: &str) -> Result<Document, ParseError> {
    Parser::new(html).parse()
}

/// Cursor-based markup parser
pub struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parse entities until the input is exhausted
    pub fn parse(mut self) -> Result<Document, ParseError> {
        let mut nodes = Vec::new();
        while !self.is_eof() {
            nodes.push(self.parse_entity(1)?);
        }
        Ok(Document::new(nodes))
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consume `s` if the input continues with it
    fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Consume everything up to `terminator` and the terminator itself,
    /// returning the text before it
    fn scan_until(&mut self, terminator: &str) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(terminator)?;
        self.pos += end + terminator.len();
        Some(&rest[..end])
    }

    fn parse_identifier(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'!' || *b == b'-')
            .count();
        self.pos += len;
        &rest[..len]
    }

    /// Consume the byte `expected`, failing with a description otherwise
    fn expect(&mut self, expected: u8, what: &'static str, element: &str) -> Result<(), ParseError> {
        match self.peek_char() {
            Some(c) if c as u32 == u32::from(expected) => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(ParseError::UnexpectedChar {
                found,
                expected: what,
                offset: self.pos,
            }),
            None => Err(self.eof(element)),
        }
    }

    fn eof(&self, element: &str) -> ParseError {
        ParseError::UnexpectedEof {
            element: element.to_string(),
            offset: self.pos,
        }
    }

    fn parse_entity(&mut self, depth: usize) -> Result<Node, ParseError> {
        if self.peek() == Some(b'<') {
            self.parse_tag(depth)
        } else {
            Ok(self.parse_text())
        }
    }

    fn parse_text(&mut self) -> Node {
        let rest = self.rest();
        let end = rest.find('<').unwrap_or(rest.len());
        self.pos += end;
        Node::text(&rest[..end])
    }

    fn parse_tag(&mut self, depth: usize) -> Result<Node, ParseError> {
        let start = self.pos;
        // parse_entity only routes here on '<'
        self.pos += 1;

        if self.starts_with(COMMENT_OPEN) || self.starts_with(ENDIF_OPEN) {
            return self.parse_comment(start);
        }
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { offset: start });
        }

        let name_offset = self.pos;
        let name = self.parse_identifier();
        if name.is_empty() {
            return Err(ParseError::IdentifierExpected {
                offset: name_offset,
            });
        }
        let element = Element::new(name);

        let mut attributes = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => attributes.push(self.parse_attribute(name)?),
                None => return Err(self.eof(name)),
            }
        }
        let element = element.with_attributes(attributes);

        let children = if self.eat("/") {
            self.expect(b'>', "'>' after '/'", name)?;
            match element.kind() {
                ElementKind::TextOnly => vec![Node::Text(String::new())],
                ElementKind::Void | ElementKind::Normal => Vec::new(),
            }
        } else {
            self.expect(b'>', "'>'", name)?;
            match element.kind() {
                ElementKind::Void => Vec::new(),
                ElementKind::TextOnly => vec![Node::Text(self.parse_text_only_body(name)?)],
                ElementKind::Normal => self.parse_children(name, depth)?,
            }
        };
        Ok(element.with_children(children).into())
    }

    /// Parse a comment; the cursor sits just after `<`
    fn parse_comment(&mut self, start: usize) -> Result<Node, ParseError> {
        let unterminated = ParseError::UnterminatedComment { offset: start };

        let value = if self.eat(COMMENT_OPEN) {
            if self.peek() == Some(b'[') {
                let body = self.scan_until(CONDITIONAL_CLOSE).ok_or(unterminated)?;
                format!("{body}]")
            } else {
                let body = self.scan_until(COMMENT_CLOSE).ok_or(unterminated)?;
                format!("{body}--")
            }
        } else {
            // `<![endif]-->`: only the `!` belongs to the opener
            self.pos += 1;
            let body = self.scan_until(COMMENT_CLOSE).ok_or(unterminated)?;
            format!("{body}--")
        };

        Ok(Node::Comment(value))
    }

    fn parse_attribute(&mut self, element: &str) -> Result<Attribute, ParseError> {
        let offset = self.pos;
        let name = self.parse_identifier();
        if name.is_empty() {
            let found = self.peek_char().ok_or_else(|| self.eof(element))?;
            return Err(ParseError::UnexpectedChar {
                found,
                expected: "attribute identifier",
                offset,
            });
        }

        if !self.eat("=") {
            return Ok(Attribute::new(name, None));
        }

        self.skip_whitespace();
        let quote = match self.peek_char() {
            Some(q @ ('"' | '\'')) => q,
            Some(found) => {
                return Err(ParseError::UnexpectedChar {
                    found,
                    expected: "quote",
                    offset: self.pos,
                })
            }
            None => return Err(self.eof(element)),
        };
        let value_offset = self.pos;
        self.pos += 1;

        let mut terminator = [0u8; 4];
        let value = self
            .scan_until(quote.encode_utf8(&mut terminator))
            .ok_or(ParseError::UnterminatedQuote {
                offset: value_offset,
            })?;

        Ok(Attribute::new(name, Some(value)))
    }

    /// Capture the raw body of a text-only element up to `</name`
    fn parse_text_only_body(&mut self, name: &str) -> Result<String, ParseError> {
        let closing = format!("</{name}");
        let body = self.scan_until(&closing).ok_or_else(|| ParseError::UnexpectedEof {
            element: name.to_string(),
            offset: self.input.len(),
        })?;
        self.skip_whitespace();
        self.expect(b'>', "'>'", name)?;
        Ok(body.to_string())
    }

    fn parse_children(&mut self, name: &str, depth: usize) -> Result<Vec<Node>, ParseError> {
        let mut children = Vec::new();
        loop {
            if self.eat("</") {
                let offset = self.pos;
                let closing = self.parse_identifier();
                if closing != name {
                    return Err(ParseError::UnexpectedClosingIdentifier {
                        expected: name.to_string(),
                        found: closing.to_string(),
                        offset,
                    });
                }
                self.skip_whitespace();
                self.expect(b'>', "'>'", name)?;
                return Ok(children);
            }
            if self.is_eof() {
                return Err(self.eof(name));
            }
            children.push(self.parse_entity(depth + 1)?);
        }
    }
}
