use anyhow::{Context, Result};
use captcha_ocr::{
    crop, find_letter_boxes, merge_horizontally, to_grayscale, to_mask, Dictionary, Error,
    Fingerprint, Segmentation, Solver, SENTINEL, THRESHOLD,
};
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb, RgbImage};
use std::thread;

const WIDTH: u32 = 200;
const HEIGHT: u32 = 70;

/// A synthetic captcha with one black bar per `(start, width)`. Every bar starts at a
/// different row, so no two bars have the same fingerprint. The background has some dark
/// gray speckles that must not be taken for ink.
fn captcha(bars: &[(u32, u32)]) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::from_fn(WIDTH, HEIGHT, |x, y| {
        if (x * 7 + y * 3) % 11 == 0 {
            Rgb([40, 40, 40])
        } else {
            Rgb([255, 255, 255])
        }
    });
    for (i, &(start, width)) in bars.iter().enumerate() {
        let top = 10 + 3 * i as u32;
        for x in start..start + width {
            for y in top..top + 30 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
    }
    img
}

fn encode(img: RgbImage, format: ImageOutputFormat) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img).write_to(&mut buf, format)?;
    Ok(buf)
}

/// Build a dictionary that labels the letters found in `data` with `labels`.
fn train(data: &[u8], labels: &str) -> Result<Dictionary> {
    let img = image::load_from_memory(data)?;
    let letters = Solver::new(Dictionary::default()).find_letters(&img)?;
    let mut entries = Vec::new();
    for (letter, label) in letters.images.iter().zip(labels.chars()) {
        entries.push((Fingerprint::of(letter)?, label));
    }
    Ok(entries.into_iter().collect())
}

fn six_letters() -> Vec<(u32, u32)> {
    (0..6).map(|i| (8 + i * 31, 20)).collect()
}

fn wrapped_letters() -> Vec<(u32, u32)> {
    vec![
        (0, 7),
        (15, 22),
        (45, 22),
        (75, 22),
        (105, 22),
        (135, 22),
        (188, 12),
    ]
}

#[test]
fn test_solve_six_letters() -> Result<()> {
    let data = encode(captcha(&six_letters()), ImageOutputFormat::Png)?;
    let solver = Solver::new(train(&data, "AABTRE")?);
    assert_eq!(solver.solve_from_memory(&data)?, "AABTRE");

    let solution = solver.recognize(&image::load_from_memory(&data)?)?;
    assert_eq!(solution.segmentation, Segmentation::Exact);
    assert_eq!(solution.resolved(), 6);
    Ok(())
}

#[test]
fn test_unknown_letters() -> Result<()> {
    let data = encode(captcha(&six_letters()), ImageOutputFormat::Png)?;
    let solver = Solver::new(Dictionary::default());
    assert_eq!(solver.solve_from_memory(&data)?, "------");
    Ok(())
}

#[test]
fn test_partial_dictionary() -> Result<()> {
    let data = encode(captcha(&six_letters()), ImageOutputFormat::Png)?;
    let full = train(&data, "MYKYAN")?;
    let partial: Dictionary = full
        .iter()
        .filter(|&(_, letter)| letter != 'Y')
        .map(|(key, letter)| (Fingerprint::from(key), letter))
        .collect();
    let solver = Solver::new(partial);
    assert_eq!(solver.solve_from_memory(&data)?, "M-K-AN");
    Ok(())
}

#[test]
fn test_three_letters() -> Result<()> {
    let known = encode(captcha(&six_letters()), ImageOutputFormat::Png)?;
    let solver = Solver::new(train(&known, "ABCDEF")?);
    let data = encode(captcha(&[(10, 20), (60, 20), (110, 20)]), ImageOutputFormat::Png)?;
    let solution = solver.recognize(&image::load_from_memory(&data)?)?;
    assert_eq!(solution.segmentation, Segmentation::Fallback { boxes: 3 });
    assert_eq!(solution.letters.len(), 6);
    assert_eq!(
        solver.solve_from_memory(&data)?,
        SENTINEL.to_string().repeat(6)
    );
    Ok(())
}

#[test]
fn test_wrap_around() -> Result<()> {
    let data = encode(captcha(&wrapped_letters()), ImageOutputFormat::Png)?;
    let img = image::load_from_memory(&data)?;
    let solver = Solver::new(train(&data, "QWERTY")?);

    let solution = solver.recognize(&img)?;
    assert_eq!(solution.segmentation, Segmentation::WrapAround);
    assert_eq!(solution.text, "QWERTY");

    let mask = to_mask(&to_grayscale(&img), THRESHOLD);
    let boxes = find_letter_boxes(&mask, solver.config().max_glyph_width);
    assert_eq!(boxes.len(), 7);
    let merged = merge_horizontally(&crop(&mask, boxes[6]), &crop(&mask, boxes[0]))?;
    assert_eq!(solution.letters[0].fingerprint, Fingerprint::of(&merged)?);
    assert_eq!(merged.dimensions(), (12 + 7, HEIGHT));
    Ok(())
}

#[test]
fn test_jpeg() -> Result<()> {
    let white = ImageBuffer::from_pixel(WIDTH, HEIGHT, Rgb([255, 255, 255]));
    let data = encode(white, ImageOutputFormat::Jpeg(90))?;
    let solver = Solver::new(Dictionary::default());
    assert_eq!(solver.solve_from_memory(&data)?, "------");
    Ok(())
}

#[test]
fn test_decode_error() {
    let solver = Solver::new(Dictionary::default());
    match solver.solve_from_memory(b"not an image") {
        Err(Error::Decode(_)) => {}
        other => panic!("expected a decode error, got {:?}", other),
    }
    match solver.solve_from_reader(&b"GIF89a"[..]) {
        Err(Error::Decode(_)) => {}
        other => panic!("expected a decode error, got {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let solver = Solver::new(Dictionary::default());
    match solver.solve_from_file("tests/captchas/does-not-exist.jpg") {
        Err(Error::Read { path, .. }) => assert!(path.ends_with("does-not-exist.jpg")),
        other => panic!("expected a read error, got {:?}", other),
    }
}

#[test]
fn test_deterministic() -> Result<()> {
    let data = encode(captcha(&six_letters()), ImageOutputFormat::Png)?;
    let img = image::load_from_memory(&data)?;
    let solver = Solver::default();
    let first = solver.recognize(&img)?;
    let second = solver.recognize(&img)?;
    assert_eq!(first.letters, second.letters);
    Ok(())
}

#[test]
fn test_concurrent_solve() -> Result<()> {
    let data = encode(captcha(&six_letters()), ImageOutputFormat::Png)?;
    let solver = Solver::new(train(&data, "PARALL")?);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let solver = solver.clone();
            let data = data.clone();
            thread::spawn(move || solver.solve_from_memory(&data))
        })
        .collect();
    for handle in handles {
        let text = handle
            .join()
            .map_err(|_| anyhow::anyhow!("solver thread panicked"))??;
        assert_eq!(text, "PARALL");
    }
    Ok(())
}

#[test]
#[ignore = "needs a captured captcha and a trained dictionary"]
fn test_solve_captcha_file() -> Result<()> {
    let dictionary = Dictionary::from_file("tests/dictionary.json")
        .context("Failed to load tests/dictionary.json")?;
    let solver = Solver::new(dictionary);
    let text = solver
        .solve_from_file("tests/captchas/AABTRE.jpg")
        .context("Failed to solve tests/captchas/AABTRE.jpg")?;
    assert_eq!(text, "AABTRE");
    Ok(())
}
