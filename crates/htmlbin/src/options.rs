//! Configuration options for encoding and packing

/// How string payloads are laid out in the binary stream.
///
/// Both encodings terminate every string with a zero byte, so the framing is
/// identical; only the bytes of non-ASCII characters differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// One byte per character (ISO-8859-1). Compatible with existing
    /// streams; characters above U+00FF cannot be encoded.
    #[default]
    Latin1,
    /// Raw UTF-8 bytes. Lossless for any text without U+0000.
    Utf8,
}

/// Options for the binary codec and the packing pipeline
#[derive(Debug, Clone)]
pub struct Options {
    /// String payload encoding
    pub string_encoding: StringEncoding,

    /// Compress packed streams
    pub compress: bool,

    /// Compression level (0-9)
    pub compression_level: u32,

    /// Log an advisory the first time a custom element or attribute is encoded
    pub report_custom_identifiers: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            string_encoding: StringEncoding::Latin1,
            compress: true,
            compression_level: 6,
            report_custom_identifiers: true,
        }
    }
}
