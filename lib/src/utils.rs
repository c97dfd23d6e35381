use crate::normalize::WHITE;
use image::imageops::replace;
use image::{GrayImage, ImageBuffer, Luma};

/// Gray value of the column that separates the letters in a collage
const SEPARATOR: u8 = 128;

/// Create a collage of letter images: all letters side by side, separated by a gray column.
///
/// Letters lower than the tallest one are padded with white at the bottom.
pub fn collage(letters: &[GrayImage]) -> GrayImage {
    if letters.is_empty() {
        return GrayImage::new(0, 0);
    }
    let height = letters.iter().map(|l| l.height()).max().unwrap_or(0);
    let width = letters.iter().map(|l| l.width()).sum::<u32>() + letters.len() as u32 - 1;
    let mut collage: GrayImage = ImageBuffer::from_pixel(width, height, Luma([WHITE]));
    let mut x = 0;
    for (i, letter) in letters.iter().enumerate() {
        if i > 0 {
            for y in 0..height {
                collage.put_pixel(x, y, Luma([SEPARATOR]));
            }
            x += 1;
        }
        replace(&mut collage, letter, x, 0);
        x += letter.width();
    }
    collage
}
