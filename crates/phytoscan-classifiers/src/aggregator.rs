//! Folds per-token classifications into the four-bucket result
//!
//! Keys are unique per bucket. When two tokens resolve to the same key the
//! later one replaces the earlier entry wholesale; nothing is merged. For
//! processed plants that means the most recent processed food becomes the
//! recorded `source`.

use phytoscan_core::{Classification, ClassificationResult, ScanStats, TokenOutcome};

/// Accumulates classifications for one scan
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    result: ClassificationResult,
    stats: ScanStats,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classification into the buckets
    pub fn absorb(&mut self, classification: &Classification) {
        self.stats.record(classification);

        match classification {
            Classification::Excluded | Classification::Unmatched => {}

            Classification::Artificial { name } => {
                self.result.artificial.insert(name.clone());
            }

            Classification::Additive { name, entry } => {
                self.result
                    .additives
                    .insert(name.clone(), vec![entry.clone()]);
            }

            Classification::ProcessedPlant { plants, .. } => {
                for plant in plants {
                    self.result
                        .processed_plants
                        .insert(plant.name.clone(), plant.compounds.clone());
                }
            }

            Classification::Natural { name, compounds } => {
                self.result.natural.insert(name.clone(), compounds.clone());
            }
        }
    }

    /// Fold a sequence of outcomes in order
    pub fn extend<'a, I>(&mut self, outcomes: I)
    where
        I: IntoIterator<Item = &'a TokenOutcome>,
    {
        for outcome in outcomes {
            self.absorb(&outcome.classification);
        }
    }

    /// Consume the aggregator
    pub fn finish(self) -> (ClassificationResult, ScanStats) {
        (self.result, self.stats)
    }

    /// Consume the aggregator, keeping only the buckets
    pub fn into_result(self) -> ClassificationResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phytoscan_core::{PhytochemicalEntry, PlantCompounds};

    fn natural(name: &str, compounds: &[&str]) -> Classification {
        Classification::Natural {
            name: name.to_string(),
            compounds: compounds
                .iter()
                .map(|c| PhytochemicalEntry::new(*c, "benefit"))
                .collect(),
        }
    }

    #[test]
    fn test_duplicate_natural_key_overwrites() {
        let mut aggregator = Aggregator::new();
        aggregator.absorb(&natural("carrots", &["beta-carotene", "lutein"]));
        aggregator.absorb(&natural("carrots", &["falcarinol"]));

        let (result, stats) = aggregator.finish();
        assert_eq!(result.natural.len(), 1);
        assert_eq!(result.natural["carrots"][0].phytochemical, "falcarinol");
        assert_eq!(stats.natural, 2);
    }

    #[test]
    fn test_artificial_is_a_set() {
        let mut aggregator = Aggregator::new();
        for _ in 0..3 {
            aggregator.absorb(&Classification::Artificial {
                name: "aspartame".to_string(),
            });
        }

        let result = aggregator.into_result();
        assert_eq!(result.artificial.len(), 1);
        assert!(result.artificial.contains("aspartame"));
    }

    #[test]
    fn test_processed_plants_take_latest_source() {
        let plant = |source: &str| Classification::ProcessedPlant {
            source: source.to_string(),
            plants: vec![PlantCompounds {
                name: "tomatoes".to_string(),
                compounds: vec![PhytochemicalEntry::new("lycopene", "benefit").with_source(source)],
            }],
        };

        let mut aggregator = Aggregator::new();
        aggregator.absorb(&plant("tomato paste"));
        aggregator.absorb(&plant("salsa"));

        let result = aggregator.into_result();
        assert_eq!(result.processed_plants.len(), 1);
        assert_eq!(
            result.processed_plants["tomatoes"][0].source.as_deref(),
            Some("salsa")
        );
    }

    #[test]
    fn test_additive_is_singleton_list() {
        let mut aggregator = Aggregator::new();
        aggregator.absorb(&Classification::Additive {
            name: "curcumin".to_string(),
            entry: PhytochemicalEntry::new("curcumin", "Anti-inflammatory."),
        });

        let result = aggregator.into_result();
        assert_eq!(result.additives["curcumin"].len(), 1);
    }

    #[test]
    fn test_dropped_tokens_only_count() {
        let mut aggregator = Aggregator::new();
        aggregator.absorb(&Classification::Excluded);
        aggregator.absorb(&Classification::Unmatched);

        let (result, stats) = aggregator.finish();
        assert!(result.is_empty());
        assert_eq!(stats.tokens, 2);
        assert_eq!(stats.excluded, 1);
        assert_eq!(stats.unmatched, 1);
    }
}
