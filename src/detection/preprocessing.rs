use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use ndarray::Array3;
use std::path::Path;

use crate::error::{Result, TextDetectError};

/// BT.601 luma weights in 14-bit fixed point (R, G, B)
const LUMA_WEIGHTS: [u32; 3] = [4899, 9617, 1868];

/// BT.601 luma of one pixel, rounded
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let weighted: u32 = pixel
        .0
        .iter()
        .zip(LUMA_WEIGHTS)
        .map(|(&channel, weight)| channel as u32 * weight)
        .sum();
    ((weighted + (1 << 13)) >> 14) as u8
}

/// Convert image to grayscale with BT.601 luma weights. Alpha is ignored.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| Luma([luma(rgb.get_pixel(x, y))]))
}

/// Decode an image file straight to grayscale
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let img = image::open(path).map_err(|source| TextDetectError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(to_grayscale(&img))
}

/// Scale a raw 0-255 intensity to 0-1
pub fn normalize(value: f32) -> f32 {
    value / 255.0
}

/// Drop `left_skip` columns on the left and `right_skip` on the right.
/// A zero skip keeps that edge.
pub fn crop_columns(img: &RgbImage, left_skip: u32, right_skip: u32) -> Result<RgbImage> {
    let (width, height) = img.dimensions();
    if left_skip + right_skip >= width {
        return Err(TextDetectError::InvalidCrop {
            left: left_skip,
            right: right_skip,
            width,
        });
    }
    let cropped_width = width - left_skip - right_skip;
    Ok(image::imageops::crop_imm(img, left_skip, 0, cropped_width, height).to_image())
}

/// Network input tensor `(height, width, 3)`: cropped, channel order reversed,
/// scaled to 0-1
pub fn prepare_input(img: &DynamicImage, left_skip: u32, right_skip: u32) -> Result<Array3<f32>> {
    let cropped = crop_columns(&img.to_rgb8(), left_skip, right_skip)?;
    let (width, height) = cropped.dimensions();

    let mut input = Array3::<f32>::zeros((height as usize, width as usize, 3));
    for (x, y, pixel) in cropped.enumerate_pixels() {
        for channel in 0..3 {
            input[[y as usize, x as usize, channel]] = normalize(pixel[2 - channel] as f32);
        }
    }
    Ok(input)
}
