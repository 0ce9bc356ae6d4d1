pub mod augment;
pub mod corpus;
pub mod samples;

use image::GrayImage;
use std::path::Path;
use tracing::debug;

use crate::detection::preprocessing;
use crate::error::{Result, TextDetectError};
use crate::models::{FeatureVector, WindowCoord};

/// Strides above this value always run without padding.
pub const MAX_PADDED_STRIDE: u32 = 5;

/// In padding mode an image may be this many pixels smaller than the window.
pub const PADDING_TOLERANCE: u32 = 4;

pub const DEFAULT_STRIDE: u32 = 5;

/// Windows sampled from one image, in row-major scan order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tiles {
    pub coordinates: Vec<WindowCoord>,
    pub features: Vec<FeatureVector>,
}

impl Tiles {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Sliding-window sampler producing fixed-size feature windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiler {
    feature_height: u32,
    feature_width: u32,
}

impl Tiler {
    pub fn new(feature_height: u32, feature_width: u32) -> Self {
        Self {
            feature_height,
            feature_width,
        }
    }

    pub fn feature_height(&self) -> u32 {
        self.feature_height
    }

    pub fn feature_width(&self) -> u32 {
        self.feature_width
    }

    /// Length of every feature vector this tiler emits
    pub fn feature_len(&self) -> usize {
        self.feature_height as usize * self.feature_width as usize
    }

    /// Sample every stride-aligned window of `image`.
    ///
    /// With padding enabled (and `stride <= MAX_PADDED_STRIDE`) the image is
    /// zero-extended so the windows cover it exactly; coordinates are then
    /// reported in the unpadded image's space and may be negative.
    /// Images too small for a single window yield empty `Tiles`.
    pub fn tile(&self, image: &GrayImage, stride: u32, padding: bool) -> Result<Tiles> {
        if stride < 1 {
            return Err(TextDetectError::InvalidStride(stride));
        }
        let padding = padding && stride <= MAX_PADDED_STRIDE;
        let (width, height) = image.dimensions();

        if !padding {
            if height < self.feature_height || width < self.feature_width {
                debug!(
                    "Image with size {}x{} is too small. Ignored when no padding.",
                    width, height
                );
                return Ok(Tiles::default());
            }
            return Ok(self.scan(image, stride, 0, 0));
        }

        if height + PADDING_TOLERANCE < self.feature_height
            || width + PADDING_TOLERANCE < self.feature_width
        {
            debug!(
                "Image with size {}x{} is too small. Ignored in padding mode.",
                width, height
            );
            return Ok(Tiles::default());
        }

        let padding_y = padding_amount(height, self.feature_height, stride);
        let padding_x = padding_amount(width, self.feature_width, stride);
        if padding_y == 0 && padding_x == 0 {
            return Ok(self.scan(image, stride, 0, 0));
        }

        let padding_top = padding_y / 2;
        let padding_left = padding_x / 2;
        let mut padded = GrayImage::new(width + padding_x, height + padding_y);
        image::imageops::replace(&mut padded, image, padding_left.into(), padding_top.into());

        Ok(self.scan(&padded, stride, padding_top, padding_left))
    }

    /// Decode an image file to grayscale and tile it
    pub fn tile_file<P: AsRef<Path>>(&self, path: P, stride: u32, padding: bool) -> Result<Tiles> {
        let gray = preprocessing::load_grayscale(path.as_ref())?;
        self.tile(&gray, stride, padding)
    }

    fn scan(&self, image: &GrayImage, stride: u32, padding_top: u32, padding_left: u32) -> Tiles {
        let (width, height) = image.dimensions();
        let mut tiles = Tiles::default();
        if height < self.feature_height || width < self.feature_width {
            return tiles;
        }

        let raw = image.as_raw();
        let row_len = width as usize;
        let window_width = self.feature_width as usize;

        for y in (0..=height - self.feature_height).step_by(stride as usize) {
            for x in (0..=width - self.feature_width).step_by(stride as usize) {
                tiles.coordinates.push(WindowCoord::new(
                    y as i64 - padding_top as i64,
                    x as i64 - padding_left as i64,
                ));

                let mut window = Vec::with_capacity(self.feature_len());
                for row in y..y + self.feature_height {
                    let start = row as usize * row_len + x as usize;
                    window.extend_from_slice(&raw[start..start + window_width]);
                }
                tiles.features.push(window);
            }
        }

        tiles
    }
}

/// Pixels to add along one axis so stride-aligned windows end on the border
fn padding_amount(image_dim: u32, feature_dim: u32, stride: u32) -> u32 {
    if image_dim > feature_dim {
        let extra = (image_dim - feature_dim) % stride;
        if extra > 0 { stride - extra } else { 0 }
    } else {
        feature_dim - image_dim
    }
}
