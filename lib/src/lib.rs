//! A library that reads the text of six letter captchas.
//!
//! Recognition is an exact lookup, no model is trained:
//! 1. the captcha is converted to gray and binarized, only (nearly) pure black pixels are ink;
//! 2. the ink columns are split into letters, touching letters are split in the middle and a
//!    letter that wraps around the image border is joined again;
//! 3. every letter mask is reduced to a [Fingerprint], a compressed bit string of its pixels;
//! 4. the fingerprint is looked up in a [Dictionary] that maps fingerprints to letters.
//!
//! # Basic usage
//! ```no_run
//! # use captcha_ocr::{Dictionary, Error, Solver};
//! let dictionary = Dictionary::from_file("dictionary.json")?;
//! let solver = Solver::new(dictionary);
//! let text = solver.solve_from_file("tests/captchas/AABTRE.jpg")?;
//! println!("{}", text);
//! # Ok::<(), Error>(())
//! ```
//! A letter that is not in the dictionary is shown as `-`, so an unknown captcha reads
//! `------` instead of failing.
//!
//! The [Solver] only reads its dictionary, it can be cloned and used from any number of
//! threads.

mod config;
mod dictionary;
mod error;
mod fingerprint;
mod normalize;
mod segment;
mod solver;
mod utils;

pub use config::{
    Config, WrapPlacement, BLANK_SIZE, GLYPH_COUNT, MAX_GLYPH_WIDTH, MIN_FIRST_GLYPH_WIDTH,
    THRESHOLD,
};
pub use dictionary::{Dictionary, SENTINEL};
pub use error::Error;
pub use fingerprint::Fingerprint;
pub use normalize::{crop_to_ink, to_grayscale, to_mask, BLACK, WHITE};
pub use segment::{blank_letter, crop, find_letter_boxes, merge_horizontally};
pub use solver::{LetterStat, Letters, Segmentation, Solution, Solver};
pub use utils::collage;
