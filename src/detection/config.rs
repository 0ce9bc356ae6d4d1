use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TextDetectError};

/// Image and grid geometry shared by the decoder and the model wrapper.
/// Every key is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionConfig {
    pub image_height: u32,
    pub image_width: u32,
    /// Grid rows
    pub grid_y_count: usize,
    /// Grid columns
    pub grid_x_count: usize,
    /// Cell height in pixels
    pub grid_y_size: u32,
    /// Cell width in pixels
    pub grid_x_size: u32,
    /// Columns cropped from the left edge before inference
    pub image_left_skip: u32,
    /// Columns cropped from the right edge before inference
    pub image_right_skip: u32,
    pub debug: bool,
}

impl DetectionConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Expected spatial shape of a grid tensor, `(rows, cols)`
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.grid_y_count, self.grid_x_count)
    }
}

/// Detection geometry plus the network selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(flatten)]
    pub detection: DetectionConfig,
    /// "Full" or "Tiny"
    pub model_architecture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_epoch: Option<u32>,
}

impl NetworkConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| TextDetectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TextDetectError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "image_height": 256, "image_width": 512,
        "grid_y_count": 8, "grid_x_count": 16,
        "grid_y_size": 32, "grid_x_size": 32,
        "image_left_skip": 16, "image_right_skip": 16,
        "debug": false
    }"#;

    #[test]
    fn parses_all_keys() {
        let config: DetectionConfig = serde_json::from_str(CONFIG).unwrap();
        assert_eq!(config.grid_shape(), (8, 16));
        assert_eq!(config.image_left_skip, 16);
    }

    #[test]
    fn missing_and_unknown_keys_fail() {
        let missing = CONFIG.replace("\"debug\": false", "\"image_left_skip2\": 0");
        assert!(serde_json::from_str::<DetectionConfig>(&missing).is_err());

        let no_debug = r#"{"image_height": 1, "image_width": 1, "grid_y_count": 1,
            "grid_x_count": 1, "grid_y_size": 1, "grid_x_size": 1,
            "image_left_skip": 0, "image_right_skip": 0}"#;
        assert!(serde_json::from_str::<DetectionConfig>(no_debug).is_err());
    }

    #[test]
    fn network_config_flattens_detection_keys() {
        let json = CONFIG.replace(
            "\"debug\": false",
            "\"debug\": true, \"model_architecture\": \"Tiny\"",
        );
        let config: NetworkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.model_architecture, "Tiny");
        assert!(config.detection.debug);
        assert_eq!(config.num_epoch, None);
    }
}
