//! HtmlBinService - the main entry point for packing and unpacking markup.

use std::sync::{Mutex, MutexGuard, PoisonError};

use htmlbin_core::{render, Document};

use crate::codec::{self, ExtensionTable};
#[cfg(feature = "gzip")]
use crate::compress::Gzip;
use crate::compress::{Compressor, Identity};
use crate::html::parse_html;
use crate::options::Options;
use crate::Result;

/// The main service for converting between markup, document trees and packed
/// byte streams.
///
/// Custom names encoded through a service accumulate in its extension table.
/// The service can be shared between threads; the table is the only state
/// behind the lock.
pub struct HtmlBinService {
    options: Options,
    extensions: Mutex<ExtensionTable>,
}

impl HtmlBinService {
    /// Create a new HtmlBinService with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an HtmlBinService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            extensions: Mutex::new(ExtensionTable::new()),
        }
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Parse markup into a document tree
    pub fn parse(&self, html: &str) -> Result<Document> {
        Ok(parse_html(html)?)
    }

    /// Render a document tree back to markup
    pub fn render(&self, document: &Document) -> String {
        render(document)
    }

    /// Encode a document tree into an uncompressed byte stream
    pub fn encode(&self, document: &Document) -> Result<Vec<u8>> {
        let mut extensions = self.lock_extensions();
        Ok(codec::encode_with(document, &self.options, &mut extensions)?)
    }

    /// Decode an uncompressed byte stream
    pub fn decode(&self, bytes: &[u8]) -> Result<Document> {
        Ok(codec::decode(bytes, &self.options)?)
    }

    /// Parse, encode and compress markup
    pub fn pack(&self, html: &str) -> Result<Vec<u8>> {
        let document = self.parse(html)?;
        let encoded = self.encode(&document)?;
        let packed = self.compressor().compress(&encoded)?;
        log::debug!(
            "packed {} bytes of markup into {} encoded / {} stored bytes",
            html.len(),
            encoded.len(),
            packed.len()
        );
        Ok(packed)
    }

    /// Decompress and decode a packed stream
    pub fn unpack(&self, packed: &[u8]) -> Result<Document> {
        let encoded = self.compressor().decompress(packed)?;
        log::debug!(
            "unpacking {} stored bytes ({} encoded)",
            packed.len(),
            encoded.len()
        );
        self.decode(&encoded)
    }

    /// Decompress, decode and render a packed stream
    pub fn unpack_html(&self, packed: &[u8]) -> Result<String> {
        Ok(render(&self.unpack(packed)?))
    }

    /// Snapshot of the custom names encoded so far
    pub fn extensions(&self) -> ExtensionTable {
        self.lock_extensions().clone()
    }

    fn lock_extensions(&self) -> MutexGuard<'_, ExtensionTable> {
        // Append-only: a poisoned table is still a valid table.
        self.extensions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn compressor(&self) -> Box<dyn Compressor> {
        if self.options.compress {
            gzip(self.options.compression_level)
        } else {
            Box::new(Identity)
        }
    }
}

#[cfg(feature = "gzip")]
fn gzip(level: u32) -> Box<dyn Compressor> {
    Box::new(Gzip::new(level))
}

#[cfg(not(feature = "gzip"))]
fn gzip(_level: u32) -> Box<dyn Compressor> {
    log::warn!("compression requested but the gzip feature is disabled");
    Box::new(Identity)
}

impl Default for HtmlBinService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StringEncoding;
    use crate::HtmlBinError;
    use htmlbin_core::Vocabulary;

    const PAGE: &str = "<html><head><title>T</title></head><body>\
                        <x-card theme=\"dark\"><p>Hi</p></x-card></body></html>";

    #[test]
    fn test_pack_unpack_html() {
        let service = HtmlBinService::new();
        let packed = service.pack(PAGE).unwrap();
        assert_eq!(service.unpack_html(&packed).unwrap(), PAGE);
    }

    #[test]
    fn test_uncompressed_pack_is_the_raw_stream() {
        let mut service = HtmlBinService::new();
        service.options_mut().compress = false;
        let packed = service.pack("<p>Hi</p>").unwrap();
        assert_eq!(packed, [15, 2, 3, b'H', b'i', 0, 0]);
    }

    #[test]
    fn test_extensions_accumulate() {
        let service = HtmlBinService::new();
        service.pack(PAGE).unwrap();
        service.pack("<x-list><x-item></x-item></x-list>").unwrap();
        let table = service.extensions();
        let names: Vec<&str> = table.names(Vocabulary::Element).collect();
        assert_eq!(names, ["x-card", "x-list", "x-item"]);
        assert!(table.contains(Vocabulary::Attribute, "theme"));
    }

    #[test]
    fn test_errors_are_wrapped() {
        let service = HtmlBinService::new();
        assert!(matches!(
            service.pack("<div><span></div>"),
            Err(HtmlBinError::Parse(_))
        ));
        assert!(matches!(
            service.decode(&[255]),
            Err(HtmlBinError::Decode(_))
        ));
        assert!(matches!(
            service.pack("<p>✓</p>"),
            Err(HtmlBinError::Encode(_))
        ));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_corrupt_packed_stream() {
        let service = HtmlBinService::new();
        assert!(matches!(
            service.unpack(b"garbage"),
            Err(HtmlBinError::Compression(_))
        ));
    }

    #[test]
    fn test_utf8_option() {
        let service = HtmlBinService::with_options(Options {
            string_encoding: StringEncoding::Utf8,
            ..Options::default()
        });
        let packed = service.pack("<p>✓ done</p>").unwrap();
        assert_eq!(service.unpack_html(&packed).unwrap(), "<p>✓ done</p>");
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HtmlBinService>();
    }
}
