//! Capture → recognize → classify
//!
//! A [`ScanSession`] is the only place the scanner meets the outside world.
//! It keeps the two collaborator failures apart so the caller can tell a
//! bad photo from a bad OCR run, and it never hands the scanner anything
//! but a recognized string.

use crate::scanner::{IngredientScanner, ScanReport};
use phytoscan_core::{Error, ImageSource, Result, TextRecognizer};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one capture/recognition/classification round
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Text returned by the recognizer
    pub text: String,

    /// Scanner output for that text
    pub report: ScanReport,

    /// Size of the captured image in bytes
    pub image_bytes: usize,

    /// Total time including capture and recognition
    pub total_latency_us: u64,
}

/// Wires an image source and a text recognizer to a scanner
#[derive(Clone)]
pub struct ScanSession {
    source: Arc<dyn ImageSource>,
    recognizer: Arc<dyn TextRecognizer>,
    scanner: IngredientScanner,
}

impl ScanSession {
    /// Create a new session
    pub fn new(
        source: Arc<dyn ImageSource>,
        recognizer: Arc<dyn TextRecognizer>,
        scanner: IngredientScanner,
    ) -> Self {
        Self {
            source,
            recognizer,
            scanner,
        }
    }

    pub fn scanner(&self) -> &IngredientScanner {
        &self.scanner
    }

    /// Capture one image, recognize it, and classify the text
    pub async fn run(&self) -> Result<SessionReport> {
        let start = Instant::now();

        let image = self
            .source
            .capture()
            .await
            .map_err(|e| as_stage_error(e, Error::Capture))?;
        if image.is_empty() {
            return Err(Error::capture(format!(
                "{} returned an empty image",
                self.source.name()
            )));
        }
        debug!(source = self.source.name(), bytes = image.len(), "Image captured");

        let text = self
            .recognizer
            .recognize_text(&image)
            .await
            .map_err(|e| as_stage_error(e, Error::Recognition))?;
        debug!(
            recognizer = self.recognizer.name(),
            chars = text.chars().count(),
            "Text recognized"
        );

        let report = self.scanner.scan(&text);
        let total_latency_us = start.elapsed().as_micros() as u64;

        info!(
            tokens = report.stats.tokens,
            matched = report.stats.matched(),
            total_latency_us,
            "Label scanned"
        );

        Ok(SessionReport {
            text,
            report,
            image_bytes: image.len(),
            total_latency_us,
        })
    }
}

/// Keep collaborator errors that already name their stage; fold anything
/// else into the stage's variant.
fn as_stage_error(error: Error, stage: fn(String) -> Error) -> Error {
    match error {
        Error::Capture(_) | Error::Recognition(_) => error,
        other => stage(other.to_string()),
    }
}
