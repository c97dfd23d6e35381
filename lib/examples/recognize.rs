use anyhow::{Context, Result};
use captcha_ocr::{Dictionary, Solver};
use std::time::Instant;

fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("Usage: recognize CAPTCHA [DICTIONARY]");
    let dictionary = match std::env::args().nth(2) {
        Some(dict) => Dictionary::from_file(&dict)
            .with_context(|| format!("Failed to load dictionary {}", dict))?,
        None => Dictionary::bundled(),
    };
    eprintln!("dictionary with {} letters", dictionary.len());
    let solver = Solver::new(dictionary);

    let t0 = Instant::now();
    let img = image::open(&path).with_context(|| format!("Failed to open {}", path))?;
    let solution = solver.recognize(&img)?;
    println!("recognize captcha took {:?}", t0.elapsed());
    println!("{} ({:?})", solution, solution.segmentation);
    for stat in solution.letters.iter() {
        println!("  {} {:?} {}", stat.index, stat.letter, stat.fingerprint);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{:?}", err);
    }
}
