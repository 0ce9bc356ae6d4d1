pub mod config;
pub mod decode;
pub mod loss;
pub mod preprocessing;
pub mod schedule;

use image::DynamicImage;
use ndarray::{Array3, ArrayView3};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::{Result, TextDetectError};
use crate::models::BoundingBox;
use config::NetworkConfig;

/// Network variants a detector can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Full,
    Tiny,
}

impl FromStr for Architecture {
    type Err = TextDetectError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Full" => Ok(Architecture::Full),
            "Tiny" => Ok(Architecture::Tiny),
            other => Err(TextDetectError::UnsupportedArchitecture(other.to_string())),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::Full => write!(f, "Full"),
            Architecture::Tiny => write!(f, "Tiny"),
        }
    }
}

/// Opaque image-to-grid network.
///
/// `infer` takes a `(height, width, 3)` tensor scaled to 0-1 and returns a
/// `(grid_rows, grid_cols, channels)` tensor with at least 5 channels.
/// Input channels are in B, G, R order (the decoded RGB reversed), so weights
/// trained on R, G, B input need their first layer swapped.
pub trait GridModel {
    fn architecture(&self) -> Architecture;

    fn load_weights(&mut self, path: &Path) -> Result<()>;

    fn infer(&self, input: ArrayView3<f32>) -> Result<Array3<f32>>;
}

/// Text region detector: crops and normalizes an image, runs the network,
/// and decodes the grid into boxes
pub struct TextDetector<M: GridModel> {
    config: NetworkConfig,
    architecture: Architecture,
    model: M,
}

impl<M: GridModel> TextDetector<M> {
    /// Fails when the configured architecture is unknown or differs from the model's
    pub fn new(config: NetworkConfig, model: M) -> Result<Self> {
        let architecture: Architecture = config.model_architecture.parse()?;
        if model.architecture() != architecture {
            return Err(TextDetectError::ArchitectureMismatch {
                expected: architecture.to_string(),
                actual: model.architecture().to_string(),
            });
        }

        if config.detection.debug {
            let detection = &config.detection;
            info!(
                "{} network: input {}x{}, grid {}x{} of {}x{} px cells",
                architecture,
                detection.image_width,
                detection.image_height,
                detection.grid_x_count,
                detection.grid_y_count,
                detection.grid_x_size,
                detection.grid_y_size
            );
        }

        Ok(Self {
            config,
            architecture,
            model,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn load_weights<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.model.load_weights(path.as_ref())
    }

    /// Detect text boxes in a full-width color image
    pub fn predict(&self, img: &DynamicImage) -> Result<Vec<BoundingBox>> {
        let detection = &self.config.detection;
        let input = preprocessing::prepare_input(
            img,
            detection.image_left_skip,
            detection.image_right_skip,
        )?;

        let (height, width, _) = input.dim();
        if (height, width) != (detection.image_height as usize, detection.image_width as usize) {
            warn!(
                "Network input is {}x{}, configured for {}x{}",
                width, height, detection.image_width, detection.image_height
            );
        }

        let grid = self.model.infer(input.view())?;
        self.decode(grid.view())
    }

    pub fn decode(&self, grid: ArrayView3<f32>) -> Result<Vec<BoundingBox>> {
        decode::decode(grid, &self.config.detection)
    }
}
