pub mod detection;
pub mod error;
pub mod features;
pub mod models;

pub use detection::config::{DetectionConfig, NetworkConfig};
pub use detection::decode::{decode, sigmoid};
pub use detection::loss::{LossTerms, loss, loss_gradient, loss_terms};
pub use detection::schedule::{learning_rate, learning_rate_logged};
pub use detection::{Architecture, GridModel, TextDetector};
pub use error::{Result, TextDetectError};
pub use features::corpus::CorpusExtractor;
pub use features::{Tiler, Tiles};
pub use models::{BoundingBox, FeatureCorpus, FeatureVector, WindowCoord};
