//! Output rendering

use crate::OutputFormat;
use phytoscan_classifiers::{KnowledgeSummary, SessionReport, ValidationIssue};
use phytoscan_core::{Bucket, ClassificationResult, PhytochemicalEntry};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Render a classification result
pub fn classification(result: &ClassificationResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)? + "\n"),
        OutputFormat::Text => Ok(TextResult(result).to_string()),
    }
}

/// Render a capture/recognition/classification round
pub fn session(outcome: &SessionReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "text": outcome.text,
                "imageBytes": outcome.image_bytes,
                "totalLatencyUs": outcome.total_latency_us,
                "result": outcome.report.result,
            });
            Ok(serde_json::to_string_pretty(&value)? + "\n")
        }
        OutputFormat::Text => Ok(TextResult(&outcome.report.result).to_string()),
    }
}

/// Render a knowledge base summary and its validation issues
pub fn knowledge_check(
    summary: &KnowledgeSummary,
    issues: &[ValidationIssue],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
            let value = serde_json::json!({ "summary": summary, "issues": issues });
            Ok(serde_json::to_string_pretty(&value)? + "\n")
        }
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "Knowledge base")?;
            writeln!(out, "  valid ingredients:       {}", summary.valid_ingredients)?;
            writeln!(out, "  artificial ingredients:  {}", summary.artificial_ingredients)?;
            writeln!(out, "  phytochemical additives: {}", summary.phytochemical_additives)?;
            writeln!(out, "  processed foods:         {}", summary.processed_foods)?;
            writeln!(out, "  exclusions:              {}", summary.exclusions)?;
            writeln!(out, "  phytochemical lists:     {}", summary.phytochemical_entries)?;
            writeln!(out, "  benefit entries:         {}", summary.benefit_entries)?;

            if issues.is_empty() {
                writeln!(out, "No issues found")?;
            } else {
                writeln!(out, "{} issue(s):", issues.len())?;
                for issue in issues {
                    writeln!(out, "  - {}", issue)?;
                }
            }
            Ok(out)
        }
    }
}

/// Four buckets in display order
struct TextResult<'a>(&'a ClassificationResult);

impl fmt::Display for TextResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        if result.is_empty() {
            return writeln!(f, "No plant-based or artificial ingredients recognized");
        }

        for bucket in Bucket::ALL {
            writeln!(f, "{} ({})", heading(bucket), result.bucket_len(bucket))?;
            match bucket {
                Bucket::Natural => write_plants(f, &result.natural)?,
                Bucket::ProcessedPlants => write_plants(f, &result.processed_plants)?,
                Bucket::Additives => write_plants(f, &result.additives)?,
                Bucket::Artificial => {
                    for name in &result.artificial {
                        writeln!(f, "  {}", name)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn heading(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Natural => "Natural ingredients",
        Bucket::ProcessedPlants => "Plants in processed foods",
        Bucket::Additives => "Phytochemical additives",
        Bucket::Artificial => "Artificial ingredients",
    }
}

fn write_plants(
    f: &mut fmt::Formatter<'_>,
    bucket: &BTreeMap<String, Vec<PhytochemicalEntry>>,
) -> fmt::Result {
    for (name, entries) in bucket {
        match entries.first().and_then(|e| e.source.as_deref()) {
            Some(source) => writeln!(f, "  {} (from {})", name, source)?,
            None => writeln!(f, "  {}", name)?,
        }
        for entry in entries {
            writeln!(f, "    - {}: {}", entry.phytochemical, entry.benefit)?;
        }
    }
    Ok(())
}
