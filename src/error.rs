use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by feature extraction and grid decoding.
#[derive(Debug, Error)]
pub enum TextDetectError {
    /// Window stride must be at least one pixel.
    #[error("Invalid stride: {0} (must be >= 1)")]
    InvalidStride(u32),

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Only "Full" and "Tiny" networks exist.
    #[error("Architecture not supported: '{0}' (only 'Full' and 'Tiny' are supported)")]
    UnsupportedArchitecture(String),

    #[error("Model architecture {actual} does not match configured {expected}")]
    ArchitectureMismatch { expected: String, actual: String },

    /// Grid tensor spatial shape disagrees with the detection configuration.
    #[error("Grid tensor shape {actual:?} does not match {expected:?} x (>= 5 channels)")]
    GridShape {
        expected: (usize, usize),
        actual: Vec<usize>,
    },

    #[error("Tensor shape mismatch: y_true {y_true:?} vs y_pred {y_pred:?}")]
    TensorShape {
        y_true: Vec<usize>,
        y_pred: Vec<usize>,
    },

    #[error("Feature length {actual} does not match a {height}x{width} window")]
    FeatureShape {
        height: u32,
        width: u32,
        actual: usize,
    },

    #[error("Cannot crop {left} + {right} columns from an image {width} pixels wide")]
    InvalidCrop { left: u32, right: u32, width: u32 },

    #[error("Model failure: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, TextDetectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextDetectError::InvalidStride(0);
        assert_eq!(format!("{err}"), "Invalid stride: 0 (must be >= 1)");

        let err = TextDetectError::UnsupportedArchitecture("Huge".to_string());
        assert!(format!("{err}").contains("'Huge'"));
    }
}
