//! Per-vehicle feature mention counting and drill-down listings.
//!
//! Every operation here is a pure function of the record slice: running it
//! twice over the same input yields identical output.

use std::collections::{BTreeMap, HashSet};

use evads_core::{AdvertisementRecord, FeatureCategory, Taxonomy};
use serde::Serialize;

use crate::categorize::CategoryMapper;
use crate::quality::QualityFilter;
use crate::sections::{parse_sections, Section};

/// Mention counts keyed by vehicle, then category. Only meaningful categories
/// appear, and a vehicle appears only once it has at least one mention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureCounts(BTreeMap<String, BTreeMap<FeatureCategory, usize>>);

impl FeatureCounts {
    fn increment(&mut self, vehicle: &str, category: FeatureCategory) {
        *self
            .0
            .entry(vehicle.to_string())
            .or_default()
            .entry(category)
            .or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, vehicle: &str) -> Option<&BTreeMap<FeatureCategory, usize>> {
        self.0.get(vehicle)
    }

    #[must_use]
    pub fn count(&self, vehicle: &str, category: FeatureCategory) -> usize {
        self.get(vehicle)
            .and_then(|by_category| by_category.get(&category))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn total_for(&self, vehicle: &str) -> usize {
        self.get(vehicle).map_or(0, |by_category| by_category.values().sum())
    }

    pub fn vehicles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories for one vehicle, highest count first, ties by name.
    #[must_use]
    pub fn ranked(&self, vehicle: &str) -> Vec<(FeatureCategory, usize)> {
        let mut ranked: Vec<(FeatureCategory, usize)> = self
            .get(vehicle)
            .map(|by_category| by_category.iter().map(|(c, n)| (*c, *n)).collect())
            .unwrap_or_default();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        ranked
    }

    /// Flat `(vehicle, category, count)` rows: vehicles in name order, each
    /// vehicle's categories ranked.
    #[must_use]
    pub fn rows(&self) -> Vec<(&str, FeatureCategory, usize)> {
        self.vehicles()
            .flat_map(|vehicle| {
                self.ranked(vehicle)
                    .into_iter()
                    .map(move |(category, count)| (vehicle, category, count))
            })
            .collect()
    }

    /// Keeps only the named vehicle.
    #[must_use]
    pub fn restricted_to(&self, vehicle: &str) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(v, _)| v.as_str() == vehicle)
                .map(|(v, c)| (v.clone(), c.clone()))
                .collect(),
        )
    }
}

/// One section of one record, tagged with its category and enough of the
/// record to audit where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMention {
    pub advertiser: String,
    pub vehicle_model: String,
    pub market: String,
    /// The raw section label as found in the text.
    pub matched_keyword: String,
    pub feature_category: FeatureCategory,
    /// `false` when the label fell through to `Other` because the table has
    /// no entry for it.
    pub label_recognized: bool,
    pub relevant_text: String,
    pub full_summary: String,
    pub source_platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionQuery {
    pub category: Option<FeatureCategory>,
    pub vehicle: Option<String>,
}

impl MentionQuery {
    #[must_use]
    pub fn category(category: FeatureCategory) -> Self {
        Self {
            category: Some(category),
            vehicle: None,
        }
    }

    #[must_use]
    pub fn for_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle.into());
        self
    }

    fn matches_vehicle(&self, record: &AdvertisementRecord) -> bool {
        self.vehicle
            .as_deref()
            .is_none_or(|v| record.vehicle_model == v)
    }
}

/// Quality-filtered, de-duplicated mentions plus the pre-filter total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MentionListing {
    pub mentions: Vec<FeatureMention>,
    pub total_before_filter: usize,
}

#[derive(Debug, Clone)]
pub struct FeatureAggregator {
    mapper: CategoryMapper,
    record_filter: QualityFilter,
    section_filter: QualityFilter,
    excluded_section_terms: Vec<String>,
}

impl FeatureAggregator {
    #[must_use]
    pub fn new(
        mapper: CategoryMapper,
        record_filter: QualityFilter,
        section_filter: QualityFilter,
        excluded_section_terms: &[String],
    ) -> Self {
        Self {
            mapper,
            record_filter,
            section_filter,
            excluded_section_terms: excluded_section_terms
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        Self::new(
            CategoryMapper::from_taxonomy(taxonomy),
            QualityFilter::new(&taxonomy.record_quality),
            QualityFilter::new(&taxonomy.section_quality),
            &taxonomy.excluded_section_terms,
        )
    }

    /// Record-level gate on the whole annotation text.
    #[must_use]
    pub fn admits_record(&self, record: &AdvertisementRecord) -> bool {
        let Some(text) = record.annotation() else {
            tracing::debug!(vehicle = %record.vehicle_model, "record has no annotation text");
            return false;
        };
        let verdict = self.record_filter.evaluate(text);
        if !verdict.is_accepted() {
            tracing::debug!(
                vehicle = %record.vehicle_model,
                advertiser = %record.advertiser_name,
                ?verdict,
                "record excluded by quality gate"
            );
        }
        verdict.is_accepted()
    }

    pub fn admitted<'a>(
        &'a self,
        records: &'a [AdvertisementRecord],
    ) -> impl Iterator<Item = &'a AdvertisementRecord> + 'a {
        records.iter().filter(|r| self.admits_record(r))
    }

    fn counted_sections<'a>(
        &'a self,
        record: &'a AdvertisementRecord,
    ) -> impl Iterator<Item = (Section, FeatureCategory)> + 'a {
        let sections = record.annotation().map(parse_sections).unwrap_or_default();
        sections.into_iter().filter_map(move |section| {
            if !self.section_filter.is_substantive(&section.content) {
                tracing::debug!(label = %section.label, "section excluded by quality gate");
                return None;
            }
            let category = self.mapper.categorize(&section.label);
            category.is_meaningful().then_some((section, category))
        })
    }

    /// Counts meaningful, quality-passing mentions per vehicle.
    #[must_use]
    pub fn count_features(&self, records: &[AdvertisementRecord]) -> FeatureCounts {
        let mut counts = FeatureCounts::default();
        let mut admitted = 0usize;

        for record in self.admitted(records) {
            admitted += 1;
            for (_, category) in self.counted_sections(record) {
                counts.increment(&record.vehicle_model, category);
            }
        }

        tracing::debug!(
            records = records.len(),
            admitted,
            vehicles = counts.0.len(),
            "feature counts aggregated"
        );
        counts
    }

    /// How often each raw section label contributed to the counts.
    #[must_use]
    pub fn section_label_counts(&self, records: &[AdvertisementRecord]) -> BTreeMap<String, usize> {
        let mut labels = BTreeMap::new();
        for record in self.admitted(records) {
            for (section, _) in self.counted_sections(record) {
                *labels.entry(section.label).or_insert(0) += 1;
            }
        }
        labels
    }

    /// Every parsed section of every admitted record that matches `query`,
    /// including `Other` and low-quality sections. This is the audit view.
    #[must_use]
    pub fn mentions(
        &self,
        records: &[AdvertisementRecord],
        query: &MentionQuery,
    ) -> Vec<FeatureMention> {
        let mut mentions = Vec::new();

        for record in self.admitted(records).filter(|r| query.matches_vehicle(r)) {
            let Some(summary) = record.annotation() else {
                continue;
            };
            for section in &parse_sections(summary) {
                let matched = self.mapper.classify(&section.label);
                let category = matched.category();
                if query.category.is_some_and(|wanted| wanted != category) {
                    continue;
                }
                mentions.push(FeatureMention {
                    advertiser: record.advertiser_name.clone(),
                    vehicle_model: record.vehicle_model.clone(),
                    market: record.market.clone(),
                    matched_keyword: section.label.clone(),
                    feature_category: category,
                    label_recognized: matched.is_recognized(),
                    relevant_text: section.content.clone(),
                    full_summary: summary.to_string(),
                    source_platform: record.source_platform.clone(),
                });
            }
        }

        mentions
    }

    /// Drill-down listing: [`Self::mentions`] minus advertiser/dealership
    /// sections, placeholder or short content, and repeated content.
    #[must_use]
    pub fn feature_mentions_detail(
        &self,
        records: &[AdvertisementRecord],
        query: &MentionQuery,
    ) -> MentionListing {
        let all = self.mentions(records, query);
        let total_before_filter = all.len();
        let mut seen_content = HashSet::new();

        let mentions = all
            .into_iter()
            .filter(|m| {
                let label = m.matched_keyword.to_lowercase();
                !self
                    .excluded_section_terms
                    .iter()
                    .any(|term| label.contains(term.as_str()))
            })
            .filter(|m| self.section_filter.is_substantive(&m.relevant_text))
            .filter(|m| seen_content.insert(m.relevant_text.trim().to_lowercase()))
            .collect();

        MentionListing {
            mentions,
            total_before_filter,
        }
    }
}

impl Default for FeatureAggregator {
    fn default() -> Self {
        Self::from_taxonomy(&Taxonomy::default())
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
