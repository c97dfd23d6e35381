use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes are not a supported image
    #[error("Image could not be decoded")]
    Decode(#[from] image::ImageError),
    /// Two glyph images that must be joined have a different height
    #[error("Glyph heights differ: {left} != {right}")]
    SegmentationGeometry { left: u32, right: u32 },
    /// Compressing a glyph bit string failed
    #[error("Fingerprint could not be encoded")]
    Encoding(#[source] io::Error),
    /// Error reading an image or dictionary file
    #[error("File {path} could not be read")]
    Read { path: String, source: io::Error },
    /// The dictionary is not a JSON object of strings
    #[error("Dictionary could not be parsed")]
    Dictionary(#[from] serde_json::Error),
}
