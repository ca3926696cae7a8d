//! Scan metrics collection and reporting

use phytoscan_core::{Bucket, ScanStats};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const SCANS_TOTAL: &str = "phytoscan_scans_total";
const TOKENS_TOTAL: &str = "phytoscan_tokens_total";
const SCAN_LATENCY_US: &str = "phytoscan_scan_latency_us";

/// Register descriptions for every metric this crate emits
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    ::metrics::describe_counter!(SCANS_TOTAL, "Total number of ingredient lists scanned");
    ::metrics::describe_counter!(
        TOKENS_TOTAL,
        "Total number of tokens classified, by outcome"
    );
    ::metrics::describe_histogram!(
        SCAN_LATENCY_US,
        ::metrics::Unit::Microseconds,
        "Scan latency in microseconds"
    );
}

/// Metrics collector for scan throughput and match rates
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    total_scans: AtomicU64,
    total_tokens: AtomicU64,
    excluded_tokens: AtomicU64,
    unmatched_tokens: AtomicU64,
    natural_hits: AtomicU64,
    processed_hits: AtomicU64,
    additive_hits: AtomicU64,
    artificial_hits: AtomicU64,
    total_latency_us: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                total_scans: AtomicU64::new(0),
                total_tokens: AtomicU64::new(0),
                excluded_tokens: AtomicU64::new(0),
                unmatched_tokens: AtomicU64::new(0),
                natural_hits: AtomicU64::new(0),
                processed_hits: AtomicU64::new(0),
                additive_hits: AtomicU64::new(0),
                artificial_hits: AtomicU64::new(0),
                total_latency_us: AtomicU64::new(0),
            }),
        }
    }

    /// Record one finished scan
    pub fn record_scan(&self, stats: &ScanStats, latency_us: u64) {
        let inner = &self.inner;
        inner.total_scans.fetch_add(1, Ordering::Relaxed);
        inner.total_tokens.fetch_add(stats.tokens, Ordering::Relaxed);
        inner.excluded_tokens.fetch_add(stats.excluded, Ordering::Relaxed);
        inner.unmatched_tokens.fetch_add(stats.unmatched, Ordering::Relaxed);
        inner.natural_hits.fetch_add(stats.natural, Ordering::Relaxed);
        inner.processed_hits.fetch_add(stats.processed_plants, Ordering::Relaxed);
        inner.additive_hits.fetch_add(stats.additives, Ordering::Relaxed);
        inner.artificial_hits.fetch_add(stats.artificial, Ordering::Relaxed);
        inner.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);

        ::metrics::counter!(SCANS_TOTAL).increment(1);
        ::metrics::counter!(TOKENS_TOTAL, "outcome" => "excluded").increment(stats.excluded);
        ::metrics::counter!(TOKENS_TOTAL, "outcome" => "unmatched").increment(stats.unmatched);
        for bucket in Bucket::ALL {
            ::metrics::counter!(TOKENS_TOTAL, "outcome" => bucket.as_str())
                .increment(stats.hits(bucket));
        }
        ::metrics::histogram!(SCAN_LATENCY_US).record(latency_us as f64);

        tracing::trace!(tokens = stats.tokens, latency_us, "Scan recorded");
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = &self.inner;
        MetricsSnapshot {
            total_scans: inner.total_scans.load(Ordering::Relaxed),
            total_tokens: inner.total_tokens.load(Ordering::Relaxed),
            excluded_tokens: inner.excluded_tokens.load(Ordering::Relaxed),
            unmatched_tokens: inner.unmatched_tokens.load(Ordering::Relaxed),
            natural_hits: inner.natural_hits.load(Ordering::Relaxed),
            processed_hits: inner.processed_hits.load(Ordering::Relaxed),
            additive_hits: inner.additive_hits.load(Ordering::Relaxed),
            artificial_hits: inner.artificial_hits.load(Ordering::Relaxed),
            total_latency_us: inner.total_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_scans: u64,
    pub total_tokens: u64,
    pub excluded_tokens: u64,
    pub unmatched_tokens: u64,
    pub natural_hits: u64,
    pub processed_hits: u64,
    pub additive_hits: u64,
    pub artificial_hits: u64,
    pub total_latency_us: u64,
}

impl MetricsSnapshot {
    /// Tokens that landed in a bucket
    pub fn matched_tokens(&self) -> u64 {
        self.natural_hits + self.processed_hits + self.additive_hits + self.artificial_hits
    }

    /// Calculate average latency per scan
    pub fn avg_latency_us(&self) -> u64 {
        if self.total_scans == 0 {
            0
        } else {
            self.total_latency_us / self.total_scans
        }
    }

    /// Share of tokens that matched something
    pub fn match_rate(&self) -> f64 {
        if self.total_tokens == 0 {
            0.0
        } else {
            self.matched_tokens() as f64 / self.total_tokens as f64
        }
    }
}
