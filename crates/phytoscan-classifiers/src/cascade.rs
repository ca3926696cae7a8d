//! Per-token classification cascade
//!
//! Each surviving token walks a fixed sequence of stages and stops at the
//! first one that matches:
//!
//! 1. Artificial ingredient (tight threshold)
//! 2. Phytochemical additive (tight threshold)
//! 3. Processed food, expanded to its plants (tight threshold)
//! 4. Natural plant ingredient (loose threshold)
//!
//! Tokens caught by the exclusion filter never enter the cascade, and a
//! token no stage accepts is [`Classification::Unmatched`].

use crate::exclusion::ExclusionFilter;
use crate::fuzzy::Threshold;
use crate::knowledge::KnowledgeBase;
use phytoscan_core::{Classification, PhytochemicalEntry, PlantCompounds, Token, TokenOutcome};

/// One step of the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    Artificial,
    Additive,
    ProcessedFood,
    Natural,
}

impl CascadeStage {
    /// Evaluation order; the first match is terminal
    pub const ORDER: [CascadeStage; 4] = [
        CascadeStage::Artificial,
        CascadeStage::Additive,
        CascadeStage::ProcessedFood,
        CascadeStage::Natural,
    ];

    /// Distance budget for this stage
    pub fn threshold(&self) -> Threshold {
        match self {
            Self::Natural => Threshold::Loose,
            Self::Artificial | Self::Additive | Self::ProcessedFood => Threshold::Tight,
        }
    }

    /// Try this stage against a token
    pub fn evaluate(&self, token: &Token, kb: &KnowledgeBase) -> Option<Classification> {
        let threshold = self.threshold();

        match self {
            Self::Artificial => kb
                .artificial_ingredients()
                .best_match(token, threshold)
                .map(|m| Classification::Artificial {
                    name: m.name.to_string(),
                }),

            Self::Additive => kb
                .phytochemical_additives()
                .best_match(token, threshold)
                .map(|m| Classification::Additive {
                    name: m.name.to_string(),
                    entry: PhytochemicalEntry::new(m.name, kb.benefit_for(m.name)),
                }),

            Self::ProcessedFood => kb
                .processed_foods()
                .best_match(token, threshold)
                .map(|m| Classification::ProcessedPlant {
                    source: m.name.to_string(),
                    plants: processed_plants(kb, m.name),
                }),

            Self::Natural => kb
                .valid_ingredients()
                .best_match(token, threshold)
                .map(|m| Classification::Natural {
                    name: m.name.to_string(),
                    compounds: compounds_for(kb, m.name),
                }),
        }
    }
}

/// Compounds of a plant with their benefit text
fn compounds_for(kb: &KnowledgeBase, plant: &str) -> Vec<PhytochemicalEntry> {
    kb.phytochemicals_for(plant)
        .iter()
        .map(|compound| PhytochemicalEntry::new(compound.as_str(), kb.benefit_for(compound)))
        .collect()
}

/// Plants behind a processed food, restricted to valid ingredients
fn processed_plants(kb: &KnowledgeBase, source: &str) -> Vec<PlantCompounds> {
    kb.plants_for(source)
        .iter()
        .filter_map(|plant| kb.valid_ingredients().canonical(plant))
        .map(|name| PlantCompounds {
            name: name.to_string(),
            compounds: compounds_for(kb, name)
                .into_iter()
                .map(|entry| entry.with_source(source))
                .collect(),
        })
        .collect()
}

/// Runs the exclusion filter and the cascade over single tokens
#[derive(Debug, Clone, Copy)]
pub struct IngredientClassifier<'a> {
    kb: &'a KnowledgeBase,
    exclusion: ExclusionFilter<'a>,
}

impl<'a> IngredientClassifier<'a> {
    /// Create a classifier borrowing the knowledge base
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            exclusion: ExclusionFilter::new(kb),
        }
    }

    /// Classify one token
    pub fn classify_token(&self, token: &Token) -> Classification {
        if self.exclusion.is_excluded(token) {
            return Classification::Excluded;
        }

        CascadeStage::ORDER
            .iter()
            .find_map(|stage| stage.evaluate(token, self.kb))
            .unwrap_or(Classification::Unmatched)
    }

    /// Classify a token and keep it alongside the verdict
    pub fn outcome(&self, token: Token) -> TokenOutcome {
        let classification = self.classify_token(&token);
        TokenOutcome {
            token,
            classification,
        }
    }
}
