//! Exact-match mapping from raw section labels to feature categories.
//!
//! The table is closed on purpose: a label the table does not list falls into
//! [`FeatureCategory::Other`] rather than being fuzzily matched, so the table
//! has to track the label vocabulary the upstream generator actually emits.

use std::collections::HashMap;

use evads_core::{FeatureCategory, SectionMapping, Taxonomy};

/// Outcome of looking a label up in the table.
///
/// `Mapped(FeatureCategory::Other)` means the label is known and deliberately
/// de-prioritized (e.g. `"Target Audience"`); `Unrecognized` means the label
/// is absent from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    Mapped(FeatureCategory),
    Unrecognized,
}

impl LabelMatch {
    #[must_use]
    pub fn category(self) -> FeatureCategory {
        match self {
            LabelMatch::Mapped(category) => category,
            LabelMatch::Unrecognized => FeatureCategory::Other,
        }
    }

    #[must_use]
    pub fn is_recognized(self) -> bool {
        matches!(self, LabelMatch::Mapped(_))
    }
}

#[derive(Debug, Clone)]
pub struct CategoryMapper {
    table: HashMap<String, FeatureCategory>,
}

impl CategoryMapper {
    /// Builds a mapper from label/category pairs. Later duplicates win.
    pub fn new<I, S>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (S, FeatureCategory)>,
        S: Into<String>,
    {
        Self {
            table: mappings
                .into_iter()
                .map(|(label, category)| (label.into(), category))
                .collect(),
        }
    }

    #[must_use]
    pub fn from_mappings(mappings: &[SectionMapping]) -> Self {
        Self::new(mappings.iter().map(|m| (m.label.clone(), m.category)))
    }

    #[must_use]
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        Self::from_mappings(&taxonomy.section_categories)
    }

    /// Looks up the trimmed label, case-sensitively.
    #[must_use]
    pub fn classify(&self, label: &str) -> LabelMatch {
        self.table
            .get(label.trim())
            .copied()
            .map_or(LabelMatch::Unrecognized, LabelMatch::Mapped)
    }

    /// Total mapping: every label yields exactly one category.
    #[must_use]
    pub fn categorize(&self, label: &str) -> FeatureCategory {
        self.classify(label).category()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::from_taxonomy(&Taxonomy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_collapse_to_range_and_charging() {
        let mapper = CategoryMapper::default();
        for label in ["Battery and Range", "Charging", "Range", "Range and Charging"] {
            assert_eq!(
                mapper.categorize(label),
                FeatureCategory::RangeCharging,
                "label {label}"
            );
        }
    }

    #[test]
    fn label_is_trimmed_before_lookup() {
        let mapper = CategoryMapper::default();
        assert_eq!(mapper.categorize("  Pricing \n"), FeatureCategory::Price);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mapper = CategoryMapper::default();
        assert_eq!(mapper.classify("safety"), LabelMatch::Unrecognized);
        assert_eq!(mapper.categorize("safety"), FeatureCategory::Other);
    }

    #[test]
    fn unmapped_label_is_other_and_unrecognized() {
        let mapper = CategoryMapper::default();
        let matched = mapper.classify("Call-to-Action");
        assert!(!matched.is_recognized());
        assert_eq!(matched.category(), FeatureCategory::Other);
    }

    #[test]
    fn meta_sections_are_recognized_as_other() {
        let mapper = CategoryMapper::default();
        for label in ["Overall Theme", "Target Audience", "Ad Format"] {
            assert_eq!(
                mapper.classify(label),
                LabelMatch::Mapped(FeatureCategory::Other),
                "label {label}"
            );
        }
    }

    #[test]
    fn visual_elements_count_as_design() {
        assert_eq!(
            CategoryMapper::default().categorize("Visual Elements"),
            FeatureCategory::Design
        );
    }

    #[test]
    fn categorize_is_total_over_arbitrary_labels() {
        let mapper = CategoryMapper::default();
        let long = "x".repeat(500);
        for label in ["", "   ", "**", "Range:", "Réseau de recharge", long.as_str()] {
            assert!(FeatureCategory::ALL.contains(&mapper.categorize(label)));
        }
    }

    #[test]
    fn substituted_table_replaces_defaults() {
        let mapper = CategoryMapper::new([("Autopilot", FeatureCategory::Safety)]);
        assert_eq!(mapper.len(), 1);
        assert_eq!(mapper.categorize("Autopilot"), FeatureCategory::Safety);
        assert_eq!(mapper.categorize("Range"), FeatureCategory::Other);
    }
}
