//! Shared test utilities: synthetic source images written to disk.

use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Write an opaque RGB PNG with a gradient so resampling has something to do.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    write_png(path, img.as_raw(), width, height, image::ExtendedColorType::Rgb8);
}

/// Write an RGBA PNG whose left half is opaque and right half half-transparent.
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 2 { 255 } else { 96 };
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, alpha])
    });
    write_png(path, img.as_raw(), width, height, image::ExtendedColorType::Rgba8);
}

fn write_png(path: &Path, data: &[u8], width: u32, height: u32, color: image::ExtendedColorType) {
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(data, width, height, color)
        .unwrap();
}
