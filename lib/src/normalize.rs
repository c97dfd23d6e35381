//! Reduce a decoded captcha to a black and white mask.
use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::contrast::threshold;
use imageproc::map::map_colors;

/// Gray value of ink pixels in a mask
pub const BLACK: u8 = 0;
/// Gray value of background pixels in a mask
pub const WHITE: u8 = 255;

/// ITU-R BT.601 luma on 16 bit premultiplied channels, rounded to 8 bits.
fn luma(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let premultiply = |c: u8| c as u64 * 257 * a as u64 / 255;
    let y = 19595 * premultiply(r) + 38470 * premultiply(g) + 7471 * premultiply(b) + (1 << 15);
    (y >> 24) as u8
}

/// Convert any decoded image to 8 bit gray.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }
    map_colors(&img.to_rgba8(), |p| Luma([luma(p[0], p[1], p[2], p[3])]))
}

/// Binarize `gray`: pixels at or below `level` become [BLACK], all others [WHITE].
pub fn to_mask(gray: &GrayImage, level: u8) -> GrayImage {
    threshold(gray, level)
}

/// Crop a mask to the smallest rectangle that holds all its ink.
///
/// A mask without any ink is returned unchanged.
pub fn crop_to_ink(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (width, height, 0, 0);
    for (x, y, p) in mask.enumerate_pixels() {
        if p[0] == BLACK {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return mask.clone();
    }
    mask.view(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
        .to_image()
}
