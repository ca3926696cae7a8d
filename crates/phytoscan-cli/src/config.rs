//! CLI configuration

use crate::OutputFormat;
use phytoscan_classifiers::{load_exclusions, KnowledgeBase, ScannerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Scan configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Knowledge base file; built-in data when absent
    #[serde(default)]
    pub knowledge_base: Option<PathBuf>,

    /// Separate exclusion list file
    #[serde(default)]
    pub exclusions: Option<PathBuf>,

    /// Output format
    #[serde(default)]
    pub output: OutputFormat,

    /// Scanner tuning
    #[serde(flatten)]
    pub scanner: ScannerConfig,

    /// External OCR program
    #[serde(default)]
    pub ocr: OcrConfig,
}

impl ScanConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(path) = &cli.knowledge_base {
            config.knowledge_base = Some(path.clone());
        }

        if let Some(path) = &cli.exclusions {
            config.exclusions = Some(path.clone());
        }

        if let Some(format) = cli.format {
            config.output = format;
        }

        if let Some(threshold) = cli.parallel_threshold {
            config.scanner.parallel_threshold = threshold;
        }

        Ok(config)
    }

    /// Build the knowledge base this run classifies against
    pub fn load_knowledge_base(&self) -> anyhow::Result<KnowledgeBase> {
        let kb = match &self.knowledge_base {
            Some(path) => KnowledgeBase::from_file(path)?,
            None => KnowledgeBase::builtin()?,
        };

        let kb = match &self.exclusions {
            Some(path) => kb.with_exclusions(load_exclusions(path)?)?,
            None => kb,
        };

        info!(summary = ?kb.summary(), "Knowledge base ready");
        Ok(kb)
    }
}

/// External OCR program configuration
///
/// The program receives the encoded image on stdin and must print the
/// recognized text on stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_ocr_program")]
    pub program: String,

    #[serde(default = "default_ocr_args")]
    pub args: Vec<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            program: default_ocr_program(),
            args: default_ocr_args(),
        }
    }
}

fn default_ocr_program() -> String {
    "tesseract".to_string()
}

fn default_ocr_args() -> Vec<String> {
    vec!["stdin".to_string(), "stdout".to_string()]
}
