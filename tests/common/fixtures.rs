use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use textdect::DetectionConfig;

/// Grayscale image whose pixels are never zero, so zero padding is easy to spot.
pub fn gradient_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([1 + ((x * 7 + y * 13) % 250) as u8]))
}

/// Saves `img` as PNG at `dir/name` and returns the path.
pub fn write_image(dir: &Path, name: &str, img: &GrayImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// Saves a solid-color RGB PNG at `dir/name` and returns the path.
pub fn write_solid_rgb(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    color: [u8; 3],
) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}

/// The `(y, x)` window of `img`, flattened row-major.
pub fn window(img: &GrayImage, y: u32, x: u32, height: u32, width: u32) -> Vec<u8> {
    let mut out = Vec::new();
    for row in y..y + height {
        for col in x..x + width {
            out.push(img.get_pixel(col, row)[0]);
        }
    }
    out
}

/// 3 x 4 grid of 32 x 16 px cells behind a 10 px left crop
pub fn test_config() -> DetectionConfig {
    DetectionConfig {
        image_height: 48,
        image_width: 128,
        grid_y_count: 3,
        grid_x_count: 4,
        grid_y_size: 16,
        grid_x_size: 32,
        image_left_skip: 10,
        image_right_skip: 6,
        debug: true,
    }
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
