use anyhow::{Context, Result};
use captcha_ocr::{collage, Solver};

fn run() -> Result<()> {
    let path = std::env::args().nth(1).expect("Usage: collage CAPTCHA");

    let img = image::open(&path).with_context(|| format!("Failed to open {}", path))?;
    eprintln!("read image from {}", path);
    let letters = Solver::default().find_letters(&img)?;
    eprintln!("segmentation: {:?}", letters.segmentation);
    for (i, letter) in letters.images.iter().enumerate() {
        eprintln!("  Letter {}: {}x{}", i, letter.width(), letter.height());
    }

    let collage = collage(&letters.images);
    collage.save("collage.png")?;

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{:?}", err);
    }
}
