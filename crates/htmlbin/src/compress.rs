//! Bulk compression of packed streams.
//!
//! Compression sees the encoded stream as opaque bytes. Gzip framing matches
//! what existing packed files use.

use std::io;

/// A reversible transformation over an opaque byte buffer
pub trait Compressor {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;
    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;
}

/// Pass-through for uncompressed streams
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Compressor for Identity {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }

    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }
}

/// Gzip framing via flate2
#[cfg(feature = "gzip")]
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: u32,
}

#[cfg(feature = "gzip")]
impl Gzip {
    /// Create a gzip compressor; levels above 9 are clamped
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }
}

#[cfg(feature = "gzip")]
impl Default for Gzip {
    fn default() -> Self {
        Self::new(6)
    }
}

#[cfg(feature = "gzip")]
impl Compressor for Gzip {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        use std::io::Write;

        let mut encoder = flate2::write::GzEncoder::new(
            Vec::with_capacity(bytes.len() / 2 + 32),
            flate2::Compression::new(self.level),
        );
        encoder.write_all(bytes)?;
        encoder.finish()
    }

    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        use std::io::Read;

        let mut decoder = flate2::read::GzDecoder::new(bytes);
        let mut out = Vec::with_capacity(bytes.len() * 4);
        decoder.read_to_end(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let data = b"\x0f\x02\x03Hi\x00\x00";
        assert_eq!(Identity.compress(data).unwrap(), data);
        assert_eq!(Identity.decompress(data).unwrap(), data);
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gzip_roundtrip() {
        let data: Vec<u8> = b"<p>repeated</p>".repeat(200);
        let gzip = Gzip::default();
        let packed = gzip.compress(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(&packed[..2], &[0x1f, 0x8b]);
        assert_eq!(gzip.decompress(&packed).unwrap(), data);
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gzip_rejects_garbage() {
        assert!(Gzip::default().decompress(b"not gzip").is_err());
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gzip_level_is_clamped() {
        assert_eq!(Gzip::new(42).level, 9);
    }
}
