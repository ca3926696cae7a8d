//! Core types for Phytoscan

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single candidate ingredient cut from the OCR text
///
/// Tokens are trimmed and lowercased by the tokenizer and consumed once by
/// the classification cascade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Normalized token text
    pub text: String,

    /// Length in Unicode scalar values, the unit every threshold uses
    pub char_len: usize,
}

impl Token {
    /// Create a token from already-normalized text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { text, char_len }
    }

    /// Borrow the token text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One phytochemical attached to a bucket entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhytochemicalEntry {
    /// Compound name as authored in the reference data
    pub phytochemical: String,

    /// Human-readable benefit description (or the generic fallback)
    #[serde(rename = "benefits")]
    pub benefit: String,

    /// Processed food that produced this entry (processed plants only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PhytochemicalEntry {
    /// Create a new entry without a source
    pub fn new(phytochemical: impl Into<String>, benefit: impl Into<String>) -> Self {
        Self {
            phytochemical: phytochemical.into(),
            benefit: benefit.into(),
            source: None,
        }
    }

    /// Attach the processed food this entry was derived from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A plant and its compounds, as produced by a processed-food match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantCompounds {
    /// Canonical plant name
    pub name: String,

    /// Compounds, each carrying the processed-food source
    pub compounds: Vec<PhytochemicalEntry>,
}

/// Terminal state of the classification cascade for one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Classification {
    /// Rejected by the exclusion filter before the cascade ran
    Excluded,

    /// Matched an artificial ingredient
    Artificial { name: String },

    /// Matched a phytochemical additive
    Additive {
        name: String,
        entry: PhytochemicalEntry,
    },

    /// Matched a processed food; carries its underlying plants
    ProcessedPlant {
        source: String,
        plants: Vec<PlantCompounds>,
    },

    /// Matched a plant ingredient directly
    Natural {
        name: String,
        compounds: Vec<PhytochemicalEntry>,
    },

    /// Matched nothing within threshold
    Unmatched,
}

impl Classification {
    /// The output bucket this classification lands in, if any
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            Self::Excluded | Self::Unmatched => None,
            Self::Artificial { .. } => Some(Bucket::Artificial),
            Self::Additive { .. } => Some(Bucket::Additives),
            Self::ProcessedPlant { .. } => Some(Bucket::ProcessedPlants),
            Self::Natural { .. } => Some(Bucket::Natural),
        }
    }

    /// Short label for logs and traces
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excluded => "excluded",
            Self::Artificial { .. } => "artificial",
            Self::Additive { .. } => "additive",
            Self::ProcessedPlant { .. } => "processed_plant",
            Self::Natural { .. } => "natural",
            Self::Unmatched => "unmatched",
        }
    }
}

/// The four named output collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Natural,
    ProcessedPlants,
    Additives,
    Artificial,
}

impl Bucket {
    /// All buckets in presentation order
    pub const ALL: [Bucket; 4] = [
        Bucket::Natural,
        Bucket::ProcessedPlants,
        Bucket::Additives,
        Bucket::Artificial,
    ];

    /// Output field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::ProcessedPlants => "processedPlants",
            Self::Additives => "additives",
            Self::Artificial => "artificial",
        }
    }
}

/// One token together with the cascade's verdict on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOutcome {
    pub token: Token,
    pub classification: Classification,
}

/// The four-bucket result of classifying one ingredient list
///
/// Map keys are canonical names, so iteration order is stable and two runs
/// over the same input serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Plant ingredients matched directly
    pub natural: BTreeMap<String, Vec<PhytochemicalEntry>>,

    /// Plant ingredients reached through a processed food
    pub processed_plants: BTreeMap<String, Vec<PhytochemicalEntry>>,

    /// Phytochemical additives, each with a single entry
    pub additives: BTreeMap<String, Vec<PhytochemicalEntry>>,

    /// Artificial ingredients, deduplicated
    pub artificial: BTreeSet<String>,
}

impl ClassificationResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every bucket is empty
    pub fn is_empty(&self) -> bool {
        self.natural.is_empty()
            && self.processed_plants.is_empty()
            && self.additives.is_empty()
            && self.artificial.is_empty()
    }

    /// Number of keys in one bucket
    pub fn bucket_len(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Natural => self.natural.len(),
            Bucket::ProcessedPlants => self.processed_plants.len(),
            Bucket::Additives => self.additives.len(),
            Bucket::Artificial => self.artificial.len(),
        }
    }

    /// Total number of keys across all buckets
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket_len(*b)).sum()
    }
}

/// Per-scan token accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Tokens produced by the tokenizer
    pub tokens: u64,

    /// Tokens dropped by the exclusion filter
    pub excluded: u64,

    /// Tokens that matched nothing
    pub unmatched: u64,

    pub natural: u64,
    pub processed_plants: u64,
    pub additives: u64,
    pub artificial: u64,
}

impl ScanStats {
    /// Count one token's classification
    pub fn record(&mut self, classification: &Classification) {
        self.tokens += 1;
        match classification.bucket() {
            Some(bucket) => *self.hits_mut(bucket) += 1,
            None if matches!(classification, Classification::Excluded) => self.excluded += 1,
            None => self.unmatched += 1,
        }
    }

    /// Tokens that landed in some bucket
    pub fn matched(&self) -> u64 {
        self.natural + self.processed_plants + self.additives + self.artificial
    }

    /// Token hits for a single bucket
    pub fn hits(&self, bucket: Bucket) -> u64 {
        match bucket {
            Bucket::Natural => self.natural,
            Bucket::ProcessedPlants => self.processed_plants,
            Bucket::Additives => self.additives,
            Bucket::Artificial => self.artificial,
        }
    }

    fn hits_mut(&mut self, bucket: Bucket) -> &mut u64 {
        match bucket {
            Bucket::Natural => &mut self.natural,
            Bucket::ProcessedPlants => &mut self.processed_plants,
            Bucket::Additives => &mut self.additives,
            Bucket::Artificial => &mut self.artificial,
        }
    }
}
