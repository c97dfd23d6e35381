/// Gray value at or below which a pixel counts as ink.
pub const THRESHOLD: u8 = 1;
/// Widest run of ink columns that is still taken as a single letter.
pub const MAX_GLYPH_WIDTH: u32 = 33;
/// A six letter segmentation whose first letter is narrower than this is rejected.
pub const MIN_FIRST_GLYPH_WIDTH: u32 = 14;
/// Number of letters in a captcha.
pub const GLYPH_COUNT: usize = 6;
/// Width and height of the blank letter that replaces a failed segmentation.
pub const BLANK_SIZE: (u32, u32) = (200, 70);

/// Where the letter rebuilt from a wrap-around segmentation is placed.
///
/// When segmentation finds one letter too many, the last box is the part of a letter that was
/// cut off by the image border; it is joined with the first box as `merge(last, first)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapPlacement {
    /// The merged letter replaces the first box and stays in the first slot.
    Leading,
    /// The first box is dropped and the merged letter is appended after the other five.
    Trailing,
}

impl Default for WrapPlacement {
    fn default() -> Self {
        WrapPlacement::Leading
    }
}

/// Tuning values for one captcha renderer.
///
/// The defaults are tuned to the renderer the bundled dictionary was collected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// See [THRESHOLD](crate::THRESHOLD)
    pub threshold: u8,
    /// See [MAX_GLYPH_WIDTH](crate::MAX_GLYPH_WIDTH)
    pub max_glyph_width: u32,
    /// See [MIN_FIRST_GLYPH_WIDTH](crate::MIN_FIRST_GLYPH_WIDTH)
    pub min_first_glyph_width: u32,
    /// See [GLYPH_COUNT](crate::GLYPH_COUNT)
    pub glyph_count: usize,
    /// See [BLANK_SIZE](crate::BLANK_SIZE)
    pub blank_size: (u32, u32),
    /// Crop every letter to its ink before fingerprinting.
    ///
    /// Off by default: the dictionary keys are taken from uncropped letters, so cropping
    /// loses the vertical position and lowers the match rate.
    pub crop_to_ink: bool,
    pub wrap_placement: WrapPlacement,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threshold: THRESHOLD,
            max_glyph_width: MAX_GLYPH_WIDTH,
            min_first_glyph_width: MIN_FIRST_GLYPH_WIDTH,
            glyph_count: GLYPH_COUNT,
            blank_size: BLANK_SIZE,
            crop_to_ink: false,
            wrap_placement: WrapPlacement::default(),
        }
    }
}
