use crate::error::Error;
use crate::normalize::{BLACK, WHITE};
use image::imageops::replace;
use image::math::Rect;
use image::{GenericImageView, GrayImage, Luma};
use log::debug;

/// Returns for every column of `mask` whether it holds at least one ink pixel.
fn ink_columns(mask: &GrayImage) -> Vec<bool> {
    let (width, height) = mask.dimensions();
    (0..width)
        .map(|x| (0..height).any(|y| mask.get_pixel(x, y)[0] == BLACK))
        .collect()
}

/// Push the box(es) for the ink run `start..=end`. A run wider than `max_width` is two
/// touching letters and is split in the middle.
fn push_run(boxes: &mut Vec<Rect>, start: u32, end: u32, height: u32, max_width: u32) {
    let column = |x0: u32, x1: u32| Rect {
        x: x0,
        y: 0,
        width: x1 - x0 + 1,
        height,
    };
    if end - start + 1 <= max_width {
        boxes.push(column(start, end));
    } else {
        let mid = (start + end) / 2;
        debug!("split run {}..={} at {}", start, end, mid);
        boxes.push(column(start, mid));
        boxes.push(column(mid + 1, end));
    }
}

/// Find the letter boxes in a mask by scanning its columns from left to right.
///
/// Every maximal run of columns containing ink becomes one box that spans the full image
/// height. Runs wider than `max_width` are split in two halves.
/// The boxes are returned in left to right order and never overlap.
pub fn find_letter_boxes(mask: &GrayImage, max_width: u32) -> Vec<Rect> {
    let height = mask.height();
    let mut boxes = Vec::new();
    let mut start = None;
    for (x, &ink) in ink_columns(mask).iter().enumerate() {
        let x = x as u32;
        match (ink, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                push_run(&mut boxes, s, x - 1, height, max_width);
                start = None;
            }
            _ => {}
        }
    }
    // a run that touches the right border
    if let Some(s) = start {
        push_run(&mut boxes, s, mask.width() - 1, height, max_width);
    }
    debug!("found {} letter boxes", boxes.len());
    boxes
}

/// Cut the area of `rect` out of the mask.
pub fn crop(mask: &GrayImage, rect: Rect) -> GrayImage {
    mask.view(rect.x, rect.y, rect.width, rect.height).to_image()
}

/// An all white letter of the given size.
pub fn blank_letter((width, height): (u32, u32)) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([WHITE]))
}

/// Join two letter images side by side, `left` first.
///
/// # Errors
/// If the images do not have the same height.
pub fn merge_horizontally(left: &GrayImage, right: &GrayImage) -> Result<GrayImage, Error> {
    if left.height() != right.height() {
        return Err(Error::SegmentationGeometry {
            left: left.height(),
            right: right.height(),
        });
    }
    let mut merged = GrayImage::new(left.width() + right.width(), left.height());
    replace(&mut merged, left, 0, 0);
    replace(&mut merged, right, left.width(), 0);
    Ok(merged)
}
