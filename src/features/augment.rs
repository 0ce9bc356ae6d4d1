use image::{GrayImage, Luma};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};

/// Augmentation angles in degrees, counter-clockwise positive.
/// Order matters: the corpus lists the -25° copy before the +25° copy.
pub const AUGMENTATION_ANGLES: [f32; 2] = [-25.0, 25.0];

/// Rotate about the image center keeping the original dimensions.
/// Uncovered corners are filled with black.
pub fn rotate(image: &GrayImage, degrees: f32) -> GrayImage {
    // imageproc rotates clockwise for positive theta
    rotate_about_center(
        image,
        -degrees.to_radians(),
        Interpolation::Bilinear,
        Luma([0u8]),
    )
}

/// The rotated copies used for augmentation, in corpus order
pub fn augmented_copies(image: &GrayImage) -> Vec<GrayImage> {
    AUGMENTATION_ANGLES
        .iter()
        .map(|&degrees| rotate(image, degrees))
        .collect()
}
