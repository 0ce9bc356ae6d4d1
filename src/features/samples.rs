use image::{GrayImage, Luma};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{Result, TextDetectError};
use crate::models::FeatureCorpus;

/// How a sample sheet is arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub rows: u32,
    pub cols: u32,
    pub samples: usize,
}

impl SheetLayout {
    /// 10x10 for large corpora, 8x8 for medium ones, otherwise every sample
    /// in a near-square grid
    pub fn for_count(count: usize) -> Self {
        if count >= 100 {
            Self {
                rows: 10,
                cols: 10,
                samples: 100,
            }
        } else if count >= 64 {
            Self {
                rows: 8,
                cols: 8,
                samples: 64,
            }
        } else if count == 0 {
            Self {
                rows: 0,
                cols: 0,
                samples: 0,
            }
        } else {
            let cols = (count as f64).sqrt().ceil() as u32;
            let rows = (count as u32).div_ceil(cols);
            Self {
                rows,
                cols,
                samples: count,
            }
        }
    }
}

/// Options for `render_sample_sheet`
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetOptions {
    /// Swap rows and columns of each window
    pub transpose: bool,
    /// Shuffle samples with this seed before picking
    pub shuffle_seed: Option<u64>,
}

/// Tile corpus windows into a single grayscale mosaic for inspection.
/// Returns `None` for an empty corpus.
pub fn render_sample_sheet(
    corpus: &FeatureCorpus,
    feature_height: u32,
    feature_width: u32,
    options: SheetOptions,
) -> Result<Option<GrayImage>> {
    if corpus.feature_len() != feature_height as usize * feature_width as usize {
        return Err(TextDetectError::FeatureShape {
            height: feature_height,
            width: feature_width,
            actual: corpus.feature_len(),
        });
    }

    let layout = SheetLayout::for_count(corpus.len());
    if layout.samples == 0 {
        return Ok(None);
    }

    let mut order: Vec<usize> = (0..corpus.len()).collect();
    if let Some(seed) = options.shuffle_seed {
        order.shuffle(&mut StdRng::seed_from_u64(seed));
    }

    let (cell_width, cell_height) = if options.transpose {
        (feature_height, feature_width)
    } else {
        (feature_width, feature_height)
    };
    let mut sheet = GrayImage::new(layout.cols * cell_width, layout.rows * cell_height);

    let vectors = corpus.vectors();
    for (slot, &index) in order.iter().take(layout.samples).enumerate() {
        let window = &vectors[index];
        let origin_x = (slot as u32 % layout.cols) * cell_width;
        let origin_y = (slot as u32 / layout.cols) * cell_height;

        for py in 0..cell_height {
            for px in 0..cell_width {
                let (row, col) = if options.transpose { (px, py) } else { (py, px) };
                let value = window[(row * feature_width + col) as usize];
                sheet.put_pixel(origin_x + px, origin_y + py, Luma([value]));
            }
        }
    }

    Ok(Some(sheet))
}
