//! Traits for the external collaborators that feed the scanner
//!
//! Image capture and text recognition are the only blocking parts of a
//! scan. They live behind these traits so the engine never sees a failed
//! stage: an implementation reports its own failure as
//! [`Error::Capture`](crate::Error::Capture) or
//! [`Error::Recognition`](crate::Error::Recognition).

use crate::Result;
use async_trait::async_trait;

/// Produces the raw bytes of a label photo
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Capture one image
    async fn capture(&self) -> Result<Vec<u8>>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Turns a label photo into text
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in an encoded image
    async fn recognize_text(&self, image: &[u8]) -> Result<String>;

    /// Get the recognizer name
    fn name(&self) -> &str;
}
