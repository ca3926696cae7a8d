//! Image sources

use async_trait::async_trait;
use phytoscan_core::{Error, ImageSource, Result};
use std::path::PathBuf;

/// Reads a label photo from disk
pub struct FileImageSource {
    path: PathBuf,
    name: String,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn capture(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::capture(format!("{}: {}", self.path.display(), e)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
