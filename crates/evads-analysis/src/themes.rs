use std::collections::BTreeMap;

use evads_core::{AdvertisementRecord, KeywordGroup};
use serde::Serialize;

/// Record counts keyed by vehicle, then keyword group name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordGroupCounts(BTreeMap<String, BTreeMap<String, usize>>);

impl KeywordGroupCounts {
    #[must_use]
    pub fn get(&self, vehicle: &str) -> Option<&BTreeMap<String, usize>> {
        self.0.get(vehicle)
    }

    #[must_use]
    pub fn count(&self, vehicle: &str, group: &str) -> usize {
        self.get(vehicle)
            .and_then(|groups| groups.get(group))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, usize>)> {
        self.0.iter().map(|(v, groups)| (v.as_str(), groups))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Counts, per known vehicle, the records whose annotation mentions any
/// keyword of each group. A record counts at most once per group no matter
/// how many of its keywords appear.
pub fn count_keyword_groups<'a, I>(records: I, groups: &[KeywordGroup]) -> KeywordGroupCounts
where
    I: IntoIterator<Item = &'a AdvertisementRecord>,
{
    let lowered: Vec<(&str, Vec<String>)> = groups
        .iter()
        .map(|g| {
            (
                g.name.as_str(),
                g.keywords.iter().map(|k| k.to_lowercase()).collect(),
            )
        })
        .collect();

    let mut counts = BTreeMap::<String, BTreeMap<String, usize>>::new();
    for record in records {
        if !record.has_known_vehicle() {
            continue;
        }
        let Some(text) = record.annotation() else {
            continue;
        };
        let text = text.to_lowercase();

        for (name, keywords) in &lowered {
            if keywords.iter().any(|k| text.contains(k.as_str())) {
                *counts
                    .entry(record.vehicle_model.clone())
                    .or_default()
                    .entry((*name).to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    KeywordGroupCounts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evads_core::{Taxonomy, UNKNOWN};

    fn ad(vehicle: &str, text: &str) -> AdvertisementRecord {
        AdvertisementRecord::new(vehicle, "Netherlands").with_annotation(text)
    }

    #[test]
    fn counts_each_group_once_per_record() {
        let records = vec![ad(
            "VW ID.4",
            "**Setting:** Urban streets downtown, then a city commute through traffic.",
        )];
        let counts = count_keyword_groups(&records, &Taxonomy::default().themes);
        assert_eq!(counts.count("VW ID.4", "City"), 1);
        assert_eq!(counts.count("VW ID.4", "Commute"), 1);
        assert_eq!(counts.count("VW ID.4", "Luxury"), 0);
    }

    #[test]
    fn matching_ignores_case() {
        let records = vec![
            ad("Tesla Model Y", "A MODERN take on the family SUV."),
            ad("Tesla Model Y", "The latest software, delivered over the air."),
        ];
        let counts = count_keyword_groups(&records, &Taxonomy::default().tones);
        assert_eq!(counts.count("Tesla Model Y", "Modern"), 2);
    }

    #[test]
    fn unknown_vehicles_and_blank_text_are_skipped() {
        let records = vec![ad(UNKNOWN, "city streets"), ad("VW ID.4", "   ")];
        let counts = count_keyword_groups(&records, &Taxonomy::default().themes);
        assert!(counts.is_empty());
    }
}
