//! Phytoscan CLI
//!
//! Classifies OCR'd ingredient lists into natural plants, plants inside
//! processed foods, phytochemical additives and artificial ingredients.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use metrics_exporter_prometheus::PrometheusHandle;
use phytoscan_classifiers::{IngredientScanner, ScanSession};
use phytoscan_telemetry::MetricsCollector;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod capture;
mod config;
mod ocr;
mod render;

use capture::FileImageSource;
use config::ScanConfig;
use ocr::CommandRecognizer;

#[derive(Parser, Debug)]
#[command(name = "phytoscan")]
#[command(
    author,
    version,
    about = "Classify ingredient labels by plant origin and phytochemical content"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "phytoscan.yaml")]
    pub config: String,

    /// Knowledge base file (YAML or JSON); built-in data when omitted
    #[arg(short, long, global = true, env = "PHYTOSCAN_KNOWLEDGE_BASE")]
    pub knowledge_base: Option<PathBuf>,

    /// Exclusion list file; replaces the knowledge base's own list
    #[arg(short = 'x', long, global = true)]
    pub exclusions: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Token count above which classification runs in parallel
    #[arg(long, global = true)]
    pub parallel_threshold: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print Prometheus metrics after the run
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify an ingredient list given as text
    Classify {
        /// Ingredient list; read from --file or stdin when omitted
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// Read the ingredient list from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Recognize a label photo with the configured OCR program, then classify it
    Scan {
        /// Label image
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Load the knowledge base and report authoring problems
    CheckKb {
        /// Exit with status 1 when any issue is found
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable bucket listing
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = ScanConfig::load(&cli.config, &cli)?;
    debug!(?config, "Configuration loaded");

    let metrics_handle = if cli.metrics {
        Some(init_metrics()?)
    } else {
        None
    };

    let kb = Arc::new(config.load_knowledge_base()?);
    let collector = MetricsCollector::new();

    let code = match &cli.command {
        Commands::Classify { text, file } => {
            let input = read_input(text.as_deref(), file.as_deref()).await?;
            let scanner = IngredientScanner::with_config(kb, config.scanner);
            let report = scanner.scan(&input);
            collector.record_scan(&report.stats, report.latency_us);

            print!("{}", render::classification(&report.result, config.output)?);
            ExitCode::SUCCESS
        }

        Commands::Scan { image } => {
            let source = Arc::new(FileImageSource::new(image));
            let recognizer = Arc::new(CommandRecognizer::from_config(&config.ocr));
            let scanner = IngredientScanner::with_config(kb, config.scanner);
            let session = ScanSession::new(source, recognizer, scanner);

            let outcome = session.run().await?;
            collector.record_scan(&outcome.report.stats, outcome.total_latency_us);
            debug!(text = %outcome.text, "Recognized label text");

            print!("{}", render::session(&outcome, config.output)?);
            ExitCode::SUCCESS
        }

        Commands::CheckKb { strict } => {
            let issues = kb.validate();
            print!(
                "{}",
                render::knowledge_check(&kb.summary(), &issues, config.output)?
            );

            if *strict && !issues.is_empty() {
                warn!(issues = issues.len(), "Knowledge base check failed");
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    };

    let snapshot = collector.snapshot();
    if snapshot.total_scans > 0 {
        info!(
            tokens = snapshot.total_tokens,
            matched = snapshot.matched_tokens(),
            match_rate = snapshot.match_rate(),
            avg_latency_us = snapshot.avg_latency_us(),
            "Run complete"
        );
    }

    if let Some(handle) = metrics_handle {
        print!("{}", handle.render());
    }

    Ok(code)
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout carries only the rendered result.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("phytoscan=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phytoscan=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    phytoscan_telemetry::describe_metrics();

    debug!("Metrics recorder installed");
    Ok(handle)
}

/// Resolve the ingredient text from the argument, a file, or stdin
async fn read_input(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    use tokio::io::AsyncReadExt;
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read ingredient list from stdin")?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "phytoscan",
            "classify",
            "carrots, beef",
            "--format",
            "json",
            "--verbose",
        ]);

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Classify { text: Some(ref t), file: None } if t == "carrots, beef"
        ));
    }

    #[test]
    fn test_cli_rejects_text_and_file_together() {
        let parsed = Cli::try_parse_from(["phytoscan", "classify", "carrots", "--file", "x.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_check_kb() {
        let cli = Cli::parse_from(["phytoscan", "check-kb", "--strict"]);
        assert!(matches!(cli.command, Commands::CheckKb { strict: true }));
        assert_eq!(cli.config, "phytoscan.yaml");
    }

    #[tokio::test]
    async fn test_read_input_prefers_argument() {
        let input = read_input(Some("carrots"), Some(Path::new("/nonexistent")))
            .await
            .unwrap();
        assert_eq!(input, "carrots");
    }

    #[tokio::test]
    async fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tomato paste; basil").unwrap();

        let input = read_input(None, Some(file.path())).await.unwrap();
        assert_eq!(input, "tomato paste; basil");
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let err = read_input(None, Some(Path::new("/nonexistent/label.txt")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("label.txt"));
    }
}
