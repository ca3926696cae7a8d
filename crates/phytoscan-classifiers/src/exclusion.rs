//! Exclusion filter for non-plant terms

use crate::fuzzy::Threshold;
use crate::knowledge::{KnowledgeBase, ReferenceSet};
use phytoscan_core::Token;

/// Drops tokens that fuzzily match the exclusion list (animal products,
/// sweeteners, condiments) before classification
#[derive(Debug, Clone, Copy)]
pub struct ExclusionFilter<'a> {
    exclusions: &'a ReferenceSet,
}

impl<'a> ExclusionFilter<'a> {
    /// Filter over the knowledge base's exclusion list
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            exclusions: kb.exclusions(),
        }
    }

    /// Filter over an arbitrary reference set
    pub fn from_set(exclusions: &'a ReferenceSet) -> Self {
        Self { exclusions }
    }

    /// Whether any exclusion entry lies within the tight threshold of the
    /// token
    pub fn is_excluded(&self, token: &Token) -> bool {
        self.exclusions.matches_any(token, Threshold::Tight)
    }
}
