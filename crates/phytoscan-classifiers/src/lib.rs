//! Phytoscan Classifiers
//!
//! Classifies noisy OCR'd ingredient lists into plant and non-plant
//! categories and attaches known phytochemicals and their benefits.
//!
//! The pipeline for one ingredient list:
//! - Tokenizer: split on commas, semicolons, newlines and wide gaps
//! - Exclusion filter: drop animal products, sweeteners and condiments
//! - Cascade: artificial → additive → processed food → natural plant,
//!   each stage a thresholded fuzzy match against a reference set
//! - Aggregator: fold the verdicts into four buckets
//!
//! The engine is synchronous and pure. A [`KnowledgeBase`] is built once
//! and shared read-only across every scan.

pub mod aggregator;
pub mod cascade;
pub mod exclusion;
pub mod fuzzy;
pub mod knowledge;
pub mod scanner;
pub mod session;
pub mod tokenizer;

pub use aggregator::Aggregator;
pub use cascade::{CascadeStage, IngredientClassifier};
pub use exclusion::ExclusionFilter;
pub use fuzzy::{best_match, edit_distance, Threshold};
pub use knowledge::{
    load_exclusions, KnowledgeBase, KnowledgeBaseSpec, KnowledgeSummary, OrderedTable,
    ReferenceSet, ValidationIssue, DEFAULT_FALLBACK_BENEFIT,
};
pub use scanner::{classify, IngredientScanner, ScanReport, ScannerConfig};
pub use session::{ScanSession, SessionReport};
pub use tokenizer::Tokenizer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::knowledge::KnowledgeBase;
    pub use crate::scanner::{classify, IngredientScanner, ScanReport, ScannerConfig};
    pub use crate::session::ScanSession;
    pub use phytoscan_core::{Bucket, Classification, ClassificationResult, PhytochemicalEntry};
}
