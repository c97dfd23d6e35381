use crate::config::{Config, WrapPlacement};
use crate::dictionary::{Dictionary, SENTINEL};
use crate::error::Error;
use crate::fingerprint::Fingerprint;
use crate::normalize::{crop_to_ink, to_grayscale, to_mask};
use crate::segment::{blank_letter, crop, find_letter_boxes, merge_horizontally};
use image::{DynamicImage, GrayImage};
use log::debug;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// How the letters of a captcha were obtained from its letter boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmentation {
    /// One box per letter
    Exact,
    /// One box too many: the last box was joined with the first
    WrapAround,
    /// The boxes were rejected and replaced by blank letters
    Fallback { boxes: usize },
}

/// The letter masks of one captcha, in reading order.
#[derive(Debug, Clone)]
pub struct Letters {
    pub images: Vec<GrayImage>,
    pub segmentation: Segmentation,
}

/// Result of the lookup of a single letter
#[derive(Debug, Clone, PartialEq)]
pub struct LetterStat {
    /// Position of the letter in the captcha
    pub index: usize,
    pub fingerprint: Fingerprint,
    /// The dictionary letter, `None` if the fingerprint is unknown
    pub letter: Option<char>,
}

/// Holds the result of [Solver::recognize].
#[derive(Debug, Clone)]
pub struct Solution {
    /// The captcha text, with [SENTINEL] for every unknown letter
    pub text: String,
    pub letters: Vec<LetterStat>,
    pub segmentation: Segmentation,
}

impl Solution {
    /// Number of letters that were found in the dictionary.
    pub fn resolved(&self) -> usize {
        self.letters.iter().filter(|l| l.letter.is_some()).count()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Captcha solver.
///
/// Holds a read only dictionary; cloning a solver shares the dictionary, so one solver can
/// be used from many threads at once.
#[derive(Debug, Clone)]
pub struct Solver {
    dictionary: Arc<Dictionary>,
    config: Config,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(Dictionary::bundled())
    }
}

impl Solver {
    pub fn new<D: Into<Arc<Dictionary>>>(dictionary: D) -> Solver {
        Solver::with_config(dictionary, Config::default())
    }

    pub fn with_config<D: Into<Arc<Dictionary>>>(dictionary: D, config: Config) -> Solver {
        Solver {
            dictionary: dictionary.into(),
            config,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Find the letters of a captcha image.
    ///
    /// The image is converted to gray and binarized, then split into letter boxes:
    /// - the expected number of boxes is accepted, unless the first box is too narrow;
    /// - one box too many means the first letter wrapped around the image border, the last
    ///   box is joined with the first;
    /// - any other segmentation is replaced by blank letters, which never match.
    ///
    /// So there are always [glyph_count](Config::glyph_count) letters.
    /// # Errors
    /// If the wrapped letter parts do not have the same height.
    pub fn find_letters(&self, img: &DynamicImage) -> Result<Letters, Error> {
        let mask = to_mask(&to_grayscale(img), self.config.threshold);
        self.find_letters_in_mask(&mask)
    }

    /// Like [find_letters](Solver::find_letters) for an already binarized image.
    pub fn find_letters_in_mask(&self, mask: &GrayImage) -> Result<Letters, Error> {
        let config = &self.config;
        let boxes = find_letter_boxes(mask, config.max_glyph_width);
        let count = boxes.len();
        let first_is_wide = boxes
            .first()
            .map_or(true, |r| r.width >= config.min_first_glyph_width);

        let (mut images, segmentation) = if count == config.glyph_count && first_is_wide {
            let images: Vec<GrayImage> = boxes.iter().map(|&r| crop(mask, r)).collect();
            (images, Segmentation::Exact)
        } else if count == config.glyph_count + 1 {
            let images = boxes.iter().map(|&r| crop(mask, r)).collect();
            let images = wrap_around(images, config.wrap_placement)?;
            (images, Segmentation::WrapAround)
        } else {
            debug!(
                "rejected segmentation with {} boxes, first box wide enough: {}",
                count, first_is_wide
            );
            let blank = blank_letter(config.blank_size);
            let images = vec![blank; config.glyph_count];
            (images, Segmentation::Fallback { boxes: count })
        };

        if config.crop_to_ink {
            images = images.iter().map(crop_to_ink).collect();
        }
        Ok(Letters {
            images,
            segmentation,
        })
    }

    /// Recognize a captcha image and return per letter details.
    ///
    /// # Errors
    /// * The letters can not be segmented
    /// * A fingerprint can not be computed
    pub fn recognize(&self, img: &DynamicImage) -> Result<Solution, Error> {
        let letters = self.find_letters(img)?;
        self.recognize_letters(letters)
    }

    fn recognize_letters(&self, letters: Letters) -> Result<Solution, Error> {
        let mut text = String::with_capacity(letters.images.len());
        let mut stats = Vec::with_capacity(letters.images.len());
        for (index, image) in letters.images.iter().enumerate() {
            let fingerprint = Fingerprint::of(image)?;
            let letter = self.dictionary.get(fingerprint.as_str());
            text.push(letter.unwrap_or(SENTINEL));
            stats.push(LetterStat {
                index,
                fingerprint,
                letter,
            });
        }
        debug!("solved {:?} ({:?})", text, letters.segmentation);
        Ok(Solution {
            text,
            letters: stats,
            segmentation: letters.segmentation,
        })
    }

    /// Solve a decoded captcha image.
    pub fn solve_image(&self, img: &DynamicImage) -> Result<String, Error> {
        Ok(self.recognize(img)?.text)
    }

    /// Solve a PNG or JPEG encoded captcha.
    ///
    /// # Errors
    /// * The data is not a supported image
    /// * See [recognize](Solver::recognize)
    pub fn solve_from_memory(&self, data: &[u8]) -> Result<String, Error> {
        let img = image::load_from_memory(data)?;
        self.solve_image(&img)
    }

    pub fn solve_from_reader<R: Read>(&self, mut reader: R) -> Result<String, Error> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|err| Error::Decode(image::ImageError::IoError(err)))?;
        self.solve_from_memory(&data)
    }

    pub fn solve_from_file<P: AsRef<Path>>(&self, path: P) -> Result<String, Error> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.solve_from_memory(&data)
    }
}

/// Rebuild the letter that wrapped around the image border from the last and first image.
fn wrap_around(
    mut images: Vec<GrayImage>,
    placement: WrapPlacement,
) -> Result<Vec<GrayImage>, Error> {
    if images.len() < 2 {
        return Ok(images);
    }
    let last = images.remove(images.len() - 1);
    let first = images.remove(0);
    let merged = merge_horizontally(&last, &first)?;
    debug!("wrap around letter {}x{}", merged.width(), merged.height());
    match placement {
        WrapPlacement::Leading => images.insert(0, merged),
        WrapPlacement::Trailing => images.push(merged),
    }
    Ok(images)
}
