//! Reference data the scanner matches against
//!
//! A [`KnowledgeBase`] is built once at startup from a [`KnowledgeBaseSpec`]
//! (YAML or JSON, camelCase keys) and then shared read-only, usually behind
//! an `Arc`, by every scan. Construction precomputes lowercase lookup
//! indexes; the canonical names are never touched.

use crate::exclusion::ExclusionFilter;
use crate::fuzzy::{self, Threshold};
use phytoscan_core::{Error, Result, Token};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{info, warn};

const BUILTIN_KNOWLEDGE: &str = include_str!("../data/knowledge.yaml");
const BUILTIN_EXCLUSIONS: &str = include_str!("../data/exclusions.yaml");

/// Benefit text used when a compound has no entry of its own
pub const DEFAULT_FALLBACK_BENEFIT: &str =
    "General health-supporting properties; specific research is limited.";

/// A mapping that keeps its entries in authored order
///
/// Processed-food keys are a best-match candidate list, so the order they
/// were written in decides ties. The lookup tables use it too, so that keys
/// colliding once lowercased resolve the same way on every load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTable<V = Vec<String>>(pub Vec<(String, V)>);

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V: Serialize> Serialize for OrderedTable<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedTable<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for TableVisitor<V> {
            type Value = OrderedTable<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Lowercase the keys of a table, keeping the first authored entry when two
/// keys collide. Returns the map and the keys that lost.
fn fold_keys<V>(table: OrderedTable<V>) -> (HashMap<String, V>, Vec<String>) {
    let mut folded = HashMap::with_capacity(table.0.len());
    let mut collisions = Vec::new();

    for (key, value) in table.0 {
        match folded.entry(key.trim().to_lowercase()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(_) => collisions.push(key),
        }
    }

    (folded, collisions)
}

/// On-disk knowledge base schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseSpec {
    /// Plant name (any case) → phytochemical names
    #[serde(default)]
    pub phytochemicals: OrderedTable,

    /// Phytochemical name → benefit description
    #[serde(default)]
    pub benefits: OrderedTable<String>,

    /// Canonical plant ingredient names
    pub valid_ingredients: Vec<String>,

    /// Canonical artificial ingredient names
    #[serde(default)]
    pub artificial_ingredients: Vec<String>,

    /// Canonical phytochemical additive names
    #[serde(default)]
    pub phytochemical_additives: Vec<String>,

    /// Processed food → underlying plant names
    #[serde(default)]
    pub processed_to_plant_map: OrderedTable,

    /// Non-plant terms (animal products, sweeteners, condiments)
    #[serde(default)]
    pub exclusions: Vec<String>,

    /// Override for the generic benefit text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_benefit: Option<String>,
}

impl KnowledgeBaseSpec {
    /// Load from a YAML (or JSON) string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }
}

/// Load a standalone exclusion list (a YAML/JSON sequence of strings)
pub fn load_exclusions(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_yaml::from_str(&content)?)
}

#[derive(Debug, Clone)]
struct ReferenceEntry {
    canonical: String,
    folded: Vec<char>,
}

/// An ordered list of canonical names with case-insensitive lookup
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    label: &'static str,
    entries: Vec<ReferenceEntry>,
    index: HashMap<String, usize>,
}

impl ReferenceSet {
    /// Build a reference set, keeping the authored order
    ///
    /// Names are trimmed; blank names are rejected. Duplicates are kept (the
    /// first one wins both lookups and ties) and reported by
    /// [`KnowledgeBase::validate`].
    pub fn new<I, S>(label: &'static str, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for name in names {
            let canonical = name.as_ref().trim();
            if canonical.is_empty() {
                return Err(Error::knowledge_base(format!(
                    "{} contains a blank name at position {}",
                    label,
                    entries.len()
                )));
            }

            let lowered = canonical.to_lowercase();
            index.entry(lowered.clone()).or_insert(entries.len());
            entries.push(ReferenceEntry {
                canonical: canonical.to_string(),
                folded: lowered.chars().collect(),
            });
        }

        Ok(Self { label, entries, index })
    }

    /// Set name used in logs and validation messages
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical names in authored order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical.as_str())
    }

    /// Case-insensitive membership
    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// Canonical spelling of `name`, if it is a member
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].canonical.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&name.trim().to_lowercase()).copied()
    }

    /// Closest member within `threshold` of the token
    pub fn best_match(&self, token: &Token, threshold: Threshold) -> Option<fuzzy::Match<'_>> {
        let chars: Vec<char> = token.text.chars().collect();
        fuzzy::best_of(
            &chars,
            self.entries
                .iter()
                .map(|e| (e.canonical.as_str(), e.folded.as_slice())),
            threshold.max_distance(token.char_len),
        )
    }

    /// Whether any member lies within `threshold` of the token
    pub fn matches_any(&self, token: &Token, threshold: Threshold) -> bool {
        let chars: Vec<char> = token.text.chars().collect();
        fuzzy::any_within(
            &chars,
            self.entries.iter().map(|e| e.folded.as_slice()),
            threshold.max_distance(token.char_len),
        )
    }

    fn duplicates(&self) -> Vec<&str> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, e)| self.index.get(&e.folded.iter().collect::<String>()) != Some(i))
            .map(|(_, e)| e.canonical.as_str())
            .collect()
    }
}

/// Table sizes, for logs and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnowledgeSummary {
    pub valid_ingredients: usize,
    pub artificial_ingredients: usize,
    pub phytochemical_additives: usize,
    pub processed_foods: usize,
    pub exclusions: usize,
    pub phytochemical_entries: usize,
    pub benefit_entries: usize,
}

/// An authoring problem found by [`KnowledgeBase::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The same name (ignoring case) appears twice in one set
    DuplicateName { set: &'static str, name: String },

    /// A processed food lists a plant that is not a valid ingredient; it will
    /// never reach the processed-plants bucket
    UnknownProcessedPlant { food: String, plant: String },

    /// A valid ingredient has no phytochemical list
    MissingPhytochemicals { plant: String },

    /// A compound or additive has no benefit text and will use the fallback
    MissingBenefit { compound: String },

    /// A reference name is itself caught by the exclusion filter, so it can
    /// never be matched
    ShadowedByExclusion { set: &'static str, name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { set, name } => write!(f, "{}: duplicate name '{}'", set, name),
            Self::UnknownProcessedPlant { food, plant } => write!(
                f,
                "processedToPlantMap: '{}' lists '{}', which is not a valid ingredient",
                food, plant
            ),
            Self::MissingPhytochemicals { plant } => {
                write!(f, "phytochemicals: no entry for '{}'", plant)
            }
            Self::MissingBenefit { compound } => {
                write!(f, "benefits: no entry for '{}'", compound)
            }
            Self::ShadowedByExclusion { set, name } => write!(
                f,
                "{}: '{}' is swallowed by the exclusion list",
                set, name
            ),
        }
    }
}

/// Immutable reference data for one process
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    valid_ingredients: ReferenceSet,
    artificial_ingredients: ReferenceSet,
    phytochemical_additives: ReferenceSet,
    processed_foods: ReferenceSet,
    /// Plants per processed food, parallel to `processed_foods`
    processed_plants: Vec<Vec<String>>,
    exclusions: ReferenceSet,
    /// Lowercase plant name → compounds
    phytochemicals: HashMap<String, Vec<String>>,
    /// Lowercase compound name → benefit text
    benefits: HashMap<String, String>,
    /// Table keys dropped because an earlier key matched them ignoring case
    shadowed_keys: Vec<(&'static str, String)>,
    fallback_benefit: String,
}

impl KnowledgeBase {
    /// Build from a parsed spec
    pub fn from_spec(spec: KnowledgeBaseSpec) -> Result<Self> {
        if spec.valid_ingredients.is_empty() {
            return Err(Error::knowledge_base("validIngredients must not be empty"));
        }

        let (food_names, processed_plants): (Vec<String>, Vec<Vec<String>>) =
            spec.processed_to_plant_map.0.into_iter().unzip();

        let (phytochemicals, plant_collisions) = fold_keys(spec.phytochemicals);
        let (benefits, benefit_collisions) = fold_keys(spec.benefits);
        let shadowed_keys = plant_collisions
            .into_iter()
            .map(|name| ("phytochemicals", name))
            .chain(benefit_collisions.into_iter().map(|name| ("benefits", name)))
            .collect();

        let fallback_benefit = match spec.fallback_benefit {
            Some(text) if !text.trim().is_empty() => text,
            _ => DEFAULT_FALLBACK_BENEFIT.to_string(),
        };

        let kb = Self {
            valid_ingredients: ReferenceSet::new("validIngredients", &spec.valid_ingredients)?,
            artificial_ingredients: ReferenceSet::new(
                "artificialIngredients",
                &spec.artificial_ingredients,
            )?,
            phytochemical_additives: ReferenceSet::new(
                "phytochemicalAdditives",
                &spec.phytochemical_additives,
            )?,
            processed_foods: ReferenceSet::new("processedToPlantMap", &food_names)?,
            processed_plants,
            exclusions: ReferenceSet::new("exclusions", &spec.exclusions)?,
            phytochemicals,
            benefits,
            shadowed_keys,
            fallback_benefit,
        };

        let summary = kb.summary();
        info!(
            plants = summary.valid_ingredients,
            artificial = summary.artificial_ingredients,
            additives = summary.phytochemical_additives,
            processed = summary.processed_foods,
            exclusions = summary.exclusions,
            "Knowledge base loaded"
        );

        Ok(kb)
    }

    /// Parse and build from a YAML (or JSON) string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_spec(KnowledgeBaseSpec::from_yaml(yaml)?)
    }

    /// Parse and build from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let spec = KnowledgeBaseSpec::from_file(path).map_err(|e| {
            Error::knowledge_base(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Self::from_spec(spec)
    }

    /// The reference data shipped with the crate
    pub fn builtin() -> Result<Self> {
        let mut spec = KnowledgeBaseSpec::from_yaml(BUILTIN_KNOWLEDGE)?;
        if spec.exclusions.is_empty() {
            spec.exclusions = serde_yaml::from_str(BUILTIN_EXCLUSIONS)?;
        }
        Self::from_spec(spec)
    }

    /// Replace the exclusion list with one supplied separately
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = ReferenceSet::new("exclusions", exclusions)?;
        Ok(self)
    }

    pub fn valid_ingredients(&self) -> &ReferenceSet {
        &self.valid_ingredients
    }

    pub fn artificial_ingredients(&self) -> &ReferenceSet {
        &self.artificial_ingredients
    }

    pub fn phytochemical_additives(&self) -> &ReferenceSet {
        &self.phytochemical_additives
    }

    /// Processed-food names in authored order
    pub fn processed_foods(&self) -> &ReferenceSet {
        &self.processed_foods
    }

    pub fn exclusions(&self) -> &ReferenceSet {
        &self.exclusions
    }

    /// Plants listed under a processed food (empty when unknown)
    pub fn plants_for(&self, processed_food: &str) -> &[String] {
        self.processed_foods
            .position(processed_food)
            .map(|i| self.processed_plants[i].as_slice())
            .unwrap_or(&[])
    }

    /// Compounds for a plant, looked up case-insensitively (empty when unknown)
    pub fn phytochemicals_for(&self, plant: &str) -> &[String] {
        self.phytochemicals
            .get(&plant.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Benefit text for a compound, or the fallback description
    pub fn benefit_for(&self, compound: &str) -> &str {
        self.benefits
            .get(&compound.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.fallback_benefit)
    }

    /// Whether a compound has its own benefit text
    pub fn has_benefit(&self, compound: &str) -> bool {
        self.benefits.contains_key(&compound.trim().to_lowercase())
    }

    pub fn fallback_benefit(&self) -> &str {
        &self.fallback_benefit
    }

    pub fn summary(&self) -> KnowledgeSummary {
        KnowledgeSummary {
            valid_ingredients: self.valid_ingredients.len(),
            artificial_ingredients: self.artificial_ingredients.len(),
            phytochemical_additives: self.phytochemical_additives.len(),
            processed_foods: self.processed_foods.len(),
            exclusions: self.exclusions.len(),
            phytochemical_entries: self.phytochemicals.len(),
            benefit_entries: self.benefits.len(),
        }
    }

    /// Check the data for authoring mistakes
    ///
    /// None of these stop the scanner from working; they point at entries
    /// that can never match or that fall back to generic text.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let sets = [
            &self.valid_ingredients,
            &self.artificial_ingredients,
            &self.phytochemical_additives,
            &self.processed_foods,
            &self.exclusions,
        ];
        for set in sets {
            for name in set.duplicates() {
                issues.push(ValidationIssue::DuplicateName {
                    set: set.label(),
                    name: name.to_string(),
                });
            }
        }
        for (set, name) in &self.shadowed_keys {
            issues.push(ValidationIssue::DuplicateName {
                set: *set,
                name: name.clone(),
            });
        }

        for (food, plants) in self.processed_foods.iter().zip(&self.processed_plants) {
            for plant in plants {
                if !self.valid_ingredients.contains(plant) {
                    issues.push(ValidationIssue::UnknownProcessedPlant {
                        food: food.to_string(),
                        plant: plant.clone(),
                    });
                }
            }
        }

        let mut seen_compounds = std::collections::HashSet::new();
        for plant in self.valid_ingredients.iter() {
            let compounds = self.phytochemicals_for(plant);
            if compounds.is_empty() {
                issues.push(ValidationIssue::MissingPhytochemicals {
                    plant: plant.to_string(),
                });
            }
            for compound in compounds {
                if seen_compounds.insert(compound.to_lowercase()) && !self.has_benefit(compound) {
                    issues.push(ValidationIssue::MissingBenefit {
                        compound: compound.clone(),
                    });
                }
            }
        }
        for additive in self.phytochemical_additives.iter() {
            if seen_compounds.insert(additive.to_lowercase()) && !self.has_benefit(additive) {
                issues.push(ValidationIssue::MissingBenefit {
                    compound: additive.to_string(),
                });
            }
        }

        let matchable = [
            &self.valid_ingredients,
            &self.artificial_ingredients,
            &self.phytochemical_additives,
            &self.processed_foods,
        ];
        let filter = ExclusionFilter::from_set(&self.exclusions);
        for set in matchable {
            for name in set.iter() {
                if filter.is_excluded(&Token::new(name.to_lowercase())) {
                    issues.push(ValidationIssue::ShadowedByExclusion {
                        set: set.label(),
                        name: name.to_string(),
                    });
                }
            }
        }

        for issue in &issues {
            warn!("{}", issue);
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
validIngredients: [Carrots, tomatoes, basil]
artificialIngredients: [aspartame, Red 40]
phytochemicalAdditives: [curcumin]
processedToPlantMap:
  tomato paste: [tomatoes]
  pesto: [basil, pine nuts]
phytochemicals:
  CARROTS: [beta-carotene, falcarinol]
  tomatoes: [lycopene]
benefits:
  Beta-Carotene: Supports vision.
  lycopene: Antioxidant.
exclusions: [beef, sugar]
"#;

    #[test]
    fn test_reference_set_keeps_canonical_casing() {
        let set = ReferenceSet::new("test", ["Red 40", "BHT"]).unwrap();
        assert!(set.contains("red 40"));
        assert_eq!(set.canonical("bht"), Some("BHT"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Red 40", "BHT"]);
    }

    #[test]
    fn test_reference_set_rejects_blank_names() {
        let err = ReferenceSet::new("validIngredients", ["kale", "  "]).unwrap_err();
        assert!(matches!(err, Error::KnowledgeBase(_)));
    }

    #[test]
    fn test_reference_set_best_match() {
        let set = ReferenceSet::new("test", ["Potatoes", "Carrots"]).unwrap();
        let found = set
            .best_match(&Token::new("patotoes"), Threshold::Loose)
            .unwrap();
        assert_eq!(found.name, "Potatoes");
        assert_eq!(found.distance, 2);
        assert!(set.best_match(&Token::new("xyz"), Threshold::Loose).is_none());
    }

    #[test]
    fn test_from_yaml_lookups() {
        let kb = KnowledgeBase::from_yaml(SMALL).unwrap();

        assert_eq!(kb.phytochemicals_for("carrots"), ["beta-carotene", "falcarinol"]);
        assert!(kb.phytochemicals_for("basil").is_empty());
        assert_eq!(kb.benefit_for("beta-carotene"), "Supports vision.");
        assert_eq!(kb.benefit_for("falcarinol"), DEFAULT_FALLBACK_BENEFIT);
        assert_eq!(kb.plants_for("Pesto"), ["basil", "pine nuts"]);
        assert!(kb.plants_for("ketchup").is_empty());
        assert_eq!(kb.valid_ingredients().canonical("carrots"), Some("Carrots"));
    }

    #[test]
    fn test_processed_map_keeps_authored_order() {
        let kb = KnowledgeBase::from_yaml(SMALL).unwrap();
        let foods: Vec<_> = kb.processed_foods().iter().collect();
        assert_eq!(foods, vec!["tomato paste", "pesto"]);
    }

    #[test]
    fn test_json_is_accepted() {
        let json = r#"{
            "validIngredients": ["kale"],
            "processedToPlantMap": {"kale chips": ["kale"], "b": ["kale"]},
            "fallbackBenefit": "Unknown benefit."
        }"#;
        let kb = KnowledgeBase::from_yaml(json).unwrap();
        assert_eq!(
            kb.processed_foods().iter().collect::<Vec<_>>(),
            vec!["kale chips", "b"]
        );
        assert_eq!(kb.benefit_for("anything"), "Unknown benefit.");
    }

    #[test]
    fn test_empty_plant_list_is_rejected() {
        let err = KnowledgeBase::from_yaml("validIngredients: []").unwrap_err();
        assert!(err.to_string().contains("validIngredients"));
    }

    #[test]
    fn test_with_exclusions_replaces_list() {
        let kb = KnowledgeBase::from_yaml(SMALL)
            .unwrap()
            .with_exclusions(["pork"])
            .unwrap();
        assert!(kb.exclusions().contains("pork"));
        assert!(!kb.exclusions().contains("beef"));
    }

    #[test]
    fn test_validate_reports_issues() {
        let yaml = r#"
validIngredients: [kale, Kale, sugar snap]
phytochemicalAdditives: [mystery]
processedToPlantMap:
  pesto: [basil]
phytochemicals:
  kale: [kaempferol]
exclusions: [sugar snaps]
"#;
        let kb = KnowledgeBase::from_yaml(yaml).unwrap();
        let issues = kb.validate();

        assert!(issues.contains(&ValidationIssue::DuplicateName {
            set: "validIngredients",
            name: "Kale".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::UnknownProcessedPlant {
            food: "pesto".to_string(),
            plant: "basil".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::MissingPhytochemicals {
            plant: "sugar snap".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::MissingBenefit {
            compound: "kaempferol".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::MissingBenefit {
            compound: "mystery".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::ShadowedByExclusion {
            set: "validIngredients",
            name: "sugar snap".to_string(),
        }));
    }

    #[test]
    fn test_case_colliding_keys_resolve_to_first_entry() {
        let yaml = r#"
validIngredients: [carrots]
phytochemicals:
  carrots: [lutein]
  Carrots: [beta-carotene]
benefits:
  lutein: Eyes A.
  Lutein: Eyes B.
"#;
        for _ in 0..50 {
            let kb = KnowledgeBase::from_yaml(yaml).unwrap();
            assert_eq!(kb.phytochemicals_for("carrots"), ["lutein"]);
            assert_eq!(kb.benefit_for("lutein"), "Eyes A.");

            let issues = kb.validate();
            assert!(issues.contains(&ValidationIssue::DuplicateName {
                set: "phytochemicals",
                name: "Carrots".to_string(),
            }));
            assert!(issues.contains(&ValidationIssue::DuplicateName {
                set: "benefits",
                name: "Lutein".to_string(),
            }));
        }
    }

    #[test]
    fn test_builtin_loads_and_validates_clean() {
        let kb = KnowledgeBase::builtin().unwrap();
        let summary = kb.summary();

        assert!(summary.valid_ingredients > 50);
        assert!(summary.exclusions > 20);
        assert!(kb.exclusions().contains("beef"));
        assert!(kb.valid_ingredients().contains("carrots"));
        assert!(kb.validate().is_empty(), "{:?}", kb.validate());
    }
}
