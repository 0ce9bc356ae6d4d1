use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Top-left offset of a sampled window in the unpadded image.
/// Negative when padding shifted the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowCoord {
    pub y: i64,
    pub x: i64,
}

impl WindowCoord {
    pub fn new(y: i64, x: i64) -> Self {
        Self { y, x }
    }
}

/// Flattened row-major pixel window.
pub type FeatureVector = Vec<u8>;

/// Detected box in image pixel coordinates, stored by center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
}

impl BoundingBox {
    pub fn new(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self { cx, cy, w, h }
    }

    /// Corner coordinates `(xmin, ymin, xmax, ymax)`, truncated toward zero
    pub fn coordinates(&self) -> (i32, i32, i32, i32) {
        let xmin = (self.cx - self.w / 2.0) as i32;
        let ymin = (self.cy - self.h / 2.0) as i32;
        let xmax = (self.cx + self.w / 2.0) as i32;
        let ymax = (self.cy + self.h / 2.0) as i32;
        (xmin, ymin, xmax, ymax)
    }
}

/// Ordered collection of equally sized feature vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCorpus {
    feature_len: usize,
    vectors: Vec<FeatureVector>,
}

impl FeatureCorpus {
    pub fn new(feature_len: usize) -> Self {
        Self {
            feature_len,
            vectors: Vec::new(),
        }
    }

    pub fn feature_len(&self) -> usize {
        self.feature_len
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    /// Append vectors in order. Vectors of the wrong length are dropped with a warning;
    /// the tiler never produces them.
    pub fn extend<I: IntoIterator<Item = FeatureVector>>(&mut self, vectors: I) {
        for vector in vectors {
            if vector.len() != self.feature_len {
                tracing::warn!(
                    "Dropping feature vector of length {} (expected {})",
                    vector.len(),
                    self.feature_len
                );
                continue;
            }
            self.vectors.push(vector);
        }
    }

    /// Corpus as an `(n, feature_len)` matrix of intensities
    pub fn to_array(&self) -> Array2<f32> {
        let mut matrix = Array2::<f32>::zeros((self.vectors.len(), self.feature_len));
        for (mut row, vector) in matrix.rows_mut().into_iter().zip(&self.vectors) {
            for (dst, &src) in row.iter_mut().zip(vector) {
                *dst = src as f32;
            }
        }
        matrix
    }
}
