mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from textdect for tests
pub use textdect::{
    Architecture, BoundingBox, CorpusExtractor, DetectionConfig, FeatureCorpus, GridModel,
    NetworkConfig, TextDetectError, TextDetector, Tiler, Tiles, WindowCoord,
};
