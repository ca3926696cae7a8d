//! Text recognition through an external OCR program

use crate::config::OcrConfig;
use async_trait::async_trait;
use phytoscan_core::{Error, Result, TextRecognizer};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Pipes the image into a program and reads the recognized text from its stdout
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }
}

#[async_trait]
impl TextRecognizer for CommandRecognizer {
    async fn recognize_text(&self, image: &[u8]) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::recognition(format!("failed to start {}: {}", self.program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::recognition("OCR program stdin unavailable"))?;

        // Feed stdin while stdout drains, or a large image can fill both pipes.
        let image = image.to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&image).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::recognition(format!("{} failed: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::recognition(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(Error::recognition(format!(
                    "failed to send image to {}: {}",
                    self.program, e
                )))
            }
            Err(e) => return Err(Error::internal(format!("image writer panicked: {}", e))),
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(program = %self.program, bytes = output.stdout.len(), "OCR finished");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.program
    }
}
