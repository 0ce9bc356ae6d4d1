use ndarray::ArrayView3;
use tracing::debug;

use super::config::DetectionConfig;
use crate::error::{Result, TextDetectError};
use crate::models::BoundingBox;

/// Cells above this confidence become boxes.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Cells above this confidence are logged when `debug` is set.
pub const DEBUG_CONFIDENCE_THRESHOLD: f32 = 0.1;

/// Channels per cell: x, y, w, h, confidence
pub const BOX_CHANNELS: usize = 5;

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Turn one `(rows, cols, channels)` network output into boxes in image
/// pixel coordinates.
///
/// Boxes come out in row-major cell order with no suppression of overlapping
/// detections from neighbouring cells.
pub fn decode(grid: ArrayView3<f32>, config: &DetectionConfig) -> Result<Vec<BoundingBox>> {
    let (rows, cols, channels) = grid.dim();
    if (rows, cols) != config.grid_shape() || channels < BOX_CHANNELS {
        return Err(TextDetectError::GridShape {
            expected: config.grid_shape(),
            actual: grid.shape().to_vec(),
        });
    }

    let cell_width = config.grid_x_size as f32;
    let cell_height = config.grid_y_size as f32;
    let left_skip = config.image_left_skip as f32;

    let mut boxes = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let cell = grid.slice(ndarray::s![row, col, ..]);

            let cx = (col as f32 + sigmoid(cell[0])) * cell_width + left_skip;
            let cy = (row as f32 + sigmoid(cell[1])) * cell_height;
            let w = cell[2] * cell_width;
            let h = cell[3] * cell_height;
            let confidence = sigmoid(cell[4]);

            if config.debug && confidence > DEBUG_CONFIDENCE_THRESHOLD {
                debug!(
                    "Net out: {:.2}, {:.2}, {:.2}, {:.2}, {:.4}",
                    cx, cy, w, h, confidence
                );
            }

            if confidence > CONFIDENCE_THRESHOLD {
                boxes.push(BoundingBox::new(cx, cy, w, h));
            }
        }
    }

    Ok(boxes)
}
