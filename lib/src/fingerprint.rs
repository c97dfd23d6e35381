use crate::error::Error;
use crate::normalize::BLACK;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::GrayImage;
use std::fmt;
use std::io::Write;

/// Dictionary key of a letter image.
///
/// The letter mask is written row by row as a string of `'1'` (ink) and `'0'` (background),
/// zlib compressed at the best compression level and hex encoded.
/// Equal masks always give equal fingerprints, but a shift of a single pixel gives a
/// completely different one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a letter mask.
    ///
    /// # Errors
    /// If the compressor fails, which only happens when memory runs out.
    pub fn of(letter: &GrayImage) -> Result<Fingerprint, Error> {
        let bits: Vec<u8> = letter
            .pixels()
            .map(|p| if p[0] == BLACK { b'1' } else { b'0' })
            .collect();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&bits).map_err(Error::Encoding)?;
        let compressed = encoder.finish().map_err(Error::Encoding)?;
        Ok(Fingerprint(hex::encode(compressed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(key: String) -> Self {
        Fingerprint(key)
    }
}

impl From<&str> for Fingerprint {
    fn from(key: &str) -> Self {
        Fingerprint(key.to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
