//! Ingredient scanner: tokenize, classify, aggregate
//!
//! The scanner is synchronous and holds no mutable state, so one instance
//! can serve any number of callers. With the `parallel` feature, token
//! batches above [`ScannerConfig::parallel_threshold`] are classified on the
//! rayon pool; outcomes are collected in token order and folded
//! sequentially, so the result does not depend on scheduling.

use crate::aggregator::Aggregator;
use crate::cascade::IngredientClassifier;
use crate::knowledge::KnowledgeBase;
use crate::tokenizer::Tokenizer;
use phytoscan_core::{ClassificationResult, ScanStats, Token, TokenOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Scanner tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Token count above which classification fans out across threads
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_parallel_threshold() -> usize {
    64
}

/// Everything a scan produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Four-bucket result
    pub result: ClassificationResult,

    /// Verdict for every token, in input order
    pub outcomes: Vec<TokenOutcome>,

    /// Token accounting
    pub stats: ScanStats,

    /// Wall-clock time spent in the scan
    #[serde(skip)]
    pub latency_us: u64,
}

/// Classifies OCR'd ingredient lists against a shared knowledge base
#[derive(Debug, Clone)]
pub struct IngredientScanner {
    kb: Arc<KnowledgeBase>,
    config: ScannerConfig,
}

impl IngredientScanner {
    /// Create a scanner with default tuning
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self::with_config(kb, ScannerConfig::default())
    }

    /// Create a scanner with explicit tuning
    pub fn with_config(kb: Arc<KnowledgeBase>, config: ScannerConfig) -> Self {
        Self { kb, config }
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Scan an ingredient list and keep the full trace
    pub fn scan(&self, text: &str) -> ScanReport {
        let start = Instant::now();

        let tokens = Tokenizer::shared().tokenize(text);
        let outcomes = self.classify_tokens(tokens);

        let mut aggregator = Aggregator::new();
        aggregator.extend(&outcomes);
        let (result, stats) = aggregator.finish();

        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            tokens = stats.tokens,
            matched = stats.matched(),
            excluded = stats.excluded,
            unmatched = stats.unmatched,
            latency_us,
            "Scan complete"
        );

        ScanReport {
            result,
            outcomes,
            stats,
            latency_us,
        }
    }

    /// Scan an ingredient list and return only the buckets
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.scan(text).result
    }

    fn classify_tokens(&self, tokens: Vec<Token>) -> Vec<TokenOutcome> {
        let classifier = IngredientClassifier::new(&self.kb);

        #[cfg(feature = "parallel")]
        let outcomes: Vec<TokenOutcome> =
            if tokens.len() > self.config.parallel_threshold && self.config.parallel_threshold > 0 {
                use rayon::prelude::*;
                tokens
                    .into_par_iter()
                    .map(|token| classifier.outcome(token))
                    .collect()
            } else {
                tokens.into_iter().map(|token| classifier.outcome(token)).collect()
            };

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<TokenOutcome> =
            tokens.into_iter().map(|token| classifier.outcome(token)).collect();

        // Logged from the caller's thread, in token order
        for outcome in &outcomes {
            debug!(
                token = %outcome.token,
                outcome = outcome.classification.label(),
                "Classified token"
            );
        }

        outcomes
    }
}

/// Classify an ingredient list against a knowledge base
///
/// Any input, including empty or entirely unrecognizable text, yields a
/// valid (possibly empty) result.
pub fn classify(text: &str, kb: &KnowledgeBase) -> ClassificationResult {
    let classifier = IngredientClassifier::new(kb);
    let mut aggregator = Aggregator::new();

    for token in Tokenizer::shared().tokenize(text) {
        aggregator.absorb(&classifier.classify_token(&token));
    }

    aggregator.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use phytoscan_core::Classification;

    fn kb() -> Arc<KnowledgeBase> {
        Arc::new(
            KnowledgeBase::from_yaml(
                r#"
validIngredients: [potatoes, carrots]
artificialIngredients: [aspartame]
phytochemicals:
  carrots: [beta-carotene]
exclusions: [beef, pork]
"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_scan_trace_follows_token_order() {
        let scanner = IngredientScanner::new(kb());
        let report = scanner.scan("Beef, CAROT, aspartam, zzzz");

        let labels: Vec<_> = report
            .outcomes
            .iter()
            .map(|o| o.classification.label())
            .collect();
        assert_eq!(labels, vec!["excluded", "natural", "artificial", "unmatched"]);
        assert_eq!(report.stats.tokens, 4);
        assert_eq!(report.stats.matched(), 2);
        assert!(report.result.natural.contains_key("carrots"));
        assert!(report.result.artificial.contains("aspartame"));
    }

    #[test]
    fn test_free_function_matches_scanner() {
        let kb = kb();
        let scanner = IngredientScanner::new(Arc::clone(&kb));
        let text = "potatoes; carrots\npork";

        assert_eq!(classify(text, &kb), scanner.classify(text));
    }

    #[test]
    fn test_parallel_threshold_does_not_change_result() {
        let kb = kb();
        let text = ["carot", "beef", "aspartame", "patotoes", "xx"].repeat(40).join(", ");

        let sequential = IngredientScanner::with_config(
            Arc::clone(&kb),
            ScannerConfig {
                parallel_threshold: 0,
            },
        )
        .scan(&text);
        let fanned_out = IngredientScanner::with_config(
            Arc::clone(&kb),
            ScannerConfig {
                parallel_threshold: 1,
            },
        )
        .scan(&text);

        assert_eq!(sequential.result, fanned_out.result);
        assert_eq!(sequential.outcomes, fanned_out.outcomes);
        assert_eq!(sequential.stats, fanned_out.stats);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_token_is_logged_on_both_paths() {
        let text = ["carot", "beef", "aspartame", "xx"].repeat(5).join(", ");

        for threshold in [0, 1] {
            let logs = CapturedLogs::default();
            let writer = logs.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();

            let scanner = IngredientScanner::with_config(
                kb(),
                ScannerConfig {
                    parallel_threshold: threshold,
                },
            );
            tracing::subscriber::with_default(subscriber, || scanner.scan(&text));

            let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
            assert_eq!(
                output.matches("Classified token").count(),
                20,
                "threshold {}",
                threshold
            );
        }
    }

    #[test]
    fn test_empty_text() {
        let report = IngredientScanner::new(kb()).scan("");
        assert!(report.result.is_empty());
        assert!(report.outcomes.is_empty());
        assert_eq!(report.stats, ScanStats::default());
    }

    #[test]
    fn test_outcome_carries_classification() {
        let report = IngredientScanner::new(kb()).scan("carrots");
        assert!(matches!(
            &report.outcomes[0].classification,
            Classification::Natural { name, .. } if name == "carrots"
        ));
    }
}
