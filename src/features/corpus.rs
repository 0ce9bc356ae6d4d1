use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{DEFAULT_STRIDE, Tiler, augment};
use crate::detection::preprocessing;
use crate::error::{Result, TextDetectError};
use crate::models::FeatureCorpus;

pub const DEFAULT_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Builds a feature corpus from every image in a directory
#[derive(Debug, Clone)]
pub struct CorpusExtractor {
    pub tiler: Tiler,
    pub extensions: Vec<String>,
    pub stride: u32,
    pub padding: bool,
    pub augment: bool,
}

impl CorpusExtractor {
    pub fn new(tiler: Tiler) -> Self {
        Self {
            tiler,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            stride: DEFAULT_STRIDE,
            padding: true,
            augment: false,
        }
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    /// Also tile the two rotated copies of each image
    pub fn with_augmentation(mut self, augment: bool) -> Self {
        self.augment = augment;
        self
    }

    /// File name suffixes to accept, matched case-insensitively
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().to_lowercase())
            .collect();
        self
    }

    /// Regular files in `dir` (non-recursive) with an accepted extension,
    /// sorted by file name
    pub fn image_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let io_err = |source| TextDetectError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if self.extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Extract windows from every image in `dir`.
    ///
    /// Corpus order is file order, then original / -25° / +25° copy, then scan
    /// order. A file that fails to decode aborts the whole extraction.
    pub fn extract<P: AsRef<Path>>(&self, dir: P) -> Result<FeatureCorpus> {
        let dir = dir.as_ref();
        let mut corpus = FeatureCorpus::new(self.tiler.feature_len());

        for path in self.image_files(dir)? {
            let before = corpus.len();
            let gray = preprocessing::load_grayscale(&path)?;

            let tiles = self.tiler.tile(&gray, self.stride, self.padding)?;
            corpus.extend(tiles.features);

            if self.augment {
                for rotated in augment::augmented_copies(&gray) {
                    let tiles = self.tiler.tile(&rotated, self.stride, self.padding)?;
                    corpus.extend(tiles.features);
                }
            }

            debug!("{}: {} windows", path.display(), corpus.len() - before);
        }

        info!(
            "Extracted {} feature vectors of length {} from {}",
            corpus.len(),
            corpus.feature_len(),
            dir.display()
        );
        Ok(corpus)
    }
}
