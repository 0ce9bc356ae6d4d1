use ndarray::{Array4, ArrayView4};

use super::decode::{BOX_CHANNELS, sigmoid};
use crate::error::{Result, TextDetectError};

pub const POSITION_WEIGHT: f32 = 1.0;
pub const SIZE_WEIGHT: f32 = 1.0;
pub const CONFIDENCE_WEIGHT: f32 = 1.2;

/// Per-term breakdown of the detection loss
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LossTerms {
    pub position: f32,
    pub size: f32,
    pub confidence: f32,
}

impl LossTerms {
    pub fn total(&self) -> f32 {
        self.position + self.size + self.confidence
    }
}

fn check_shapes(y_true: &ArrayView4<f32>, y_pred: &ArrayView4<f32>) -> Result<()> {
    if y_true.shape() != y_pred.shape() || y_true.dim().3 < BOX_CHANNELS {
        return Err(TextDetectError::TensorShape {
            y_true: y_true.shape().to_vec(),
            y_pred: y_pred.shape().to_vec(),
        });
    }
    Ok(())
}

/// Weighted loss terms over `(batch, rows, cols, channels)` tensors.
///
/// Predicted x/y and confidence go through the sigmoid, predicted w/h are
/// used raw. Position and size errors only count in cells whose true
/// confidence is set; the confidence error counts everywhere.
pub fn loss_terms(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> Result<LossTerms> {
    check_shapes(&y_true, &y_pred)?;
    let (batch, rows, cols, _) = y_true.dim();

    let mut terms = LossTerms::default();
    for b in 0..batch {
        for row in 0..rows {
            for col in 0..cols {
                let mask = y_true[[b, row, col, 4]];

                for channel in 0..2 {
                    let predicted = sigmoid(y_pred[[b, row, col, channel]]);
                    let diff = y_true[[b, row, col, channel]] - predicted;
                    terms.position += diff * diff * mask;
                }
                for channel in 2..4 {
                    let diff = y_true[[b, row, col, channel]] - y_pred[[b, row, col, channel]];
                    terms.size += diff * diff * mask;
                }
                let diff = y_true[[b, row, col, 4]] - sigmoid(y_pred[[b, row, col, 4]]);
                terms.confidence += diff * diff;
            }
        }
    }

    terms.position *= POSITION_WEIGHT;
    terms.size *= SIZE_WEIGHT;
    terms.confidence *= CONFIDENCE_WEIGHT;
    Ok(terms)
}

/// Scalar training loss
pub fn loss(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> Result<f32> {
    Ok(loss_terms(y_true, y_pred)?.total())
}

/// Gradient of `loss` with respect to `y_pred`. Channels past the fifth get zero.
pub fn loss_gradient(y_true: ArrayView4<f32>, y_pred: ArrayView4<f32>) -> Result<Array4<f32>> {
    check_shapes(&y_true, &y_pred)?;
    let (batch, rows, cols, _) = y_true.dim();

    let mut grad = Array4::<f32>::zeros(y_pred.raw_dim());
    for b in 0..batch {
        for row in 0..rows {
            for col in 0..cols {
                let mask = y_true[[b, row, col, 4]];

                for channel in 0..2 {
                    let s = sigmoid(y_pred[[b, row, col, channel]]);
                    let diff = s - y_true[[b, row, col, channel]];
                    grad[[b, row, col, channel]] =
                        POSITION_WEIGHT * 2.0 * diff * mask * s * (1.0 - s);
                }
                for channel in 2..4 {
                    let diff = y_pred[[b, row, col, channel]] - y_true[[b, row, col, channel]];
                    grad[[b, row, col, channel]] = SIZE_WEIGHT * 2.0 * diff * mask;
                }
                let s = sigmoid(y_pred[[b, row, col, 4]]);
                let diff = s - y_true[[b, row, col, 4]];
                grad[[b, row, col, 4]] = CONFIDENCE_WEIGHT * 2.0 * diff * s * (1.0 - s);
            }
        }
    }

    Ok(grad)
}
