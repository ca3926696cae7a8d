//! Phytoscan Telemetry
//!
//! Counters for scans and their token outcomes, kept in-process and
//! mirrored to the `metrics` facade so any installed recorder (the CLI uses
//! Prometheus) sees them too.

pub mod metrics;

pub use crate::metrics::{describe_metrics, MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
}
