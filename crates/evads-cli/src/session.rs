//! Shared state for every command: config, taxonomy, and the in-scope
//! records.

use std::path::Path;

use anyhow::Context;
use evads_analysis::FeatureAggregator;
use evads_core::{load_taxonomy, AdvertisementRecord, AppConfig, Taxonomy};
use evads_ingest::{load_records, TargetScope};

pub(crate) struct Session {
    pub(crate) config: AppConfig,
    pub(crate) taxonomy: Taxonomy,
    pub(crate) aggregator: FeatureAggregator,
    pub(crate) records: Vec<AdvertisementRecord>,
}

impl Session {
    /// Loads the taxonomy (override, configured file, or built-in tables) and
    /// the records at the data path, scoped to target markets and vehicles and
    /// gated on annotation quality.
    ///
    /// # Errors
    ///
    /// Returns an error if the taxonomy file is invalid or the records cannot
    /// be loaded.
    pub(crate) fn open(
        config: AppConfig,
        data_override: Option<&Path>,
        taxonomy_override: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let taxonomy = match taxonomy_override.or(config.taxonomy_path.as_deref()) {
            Some(path) => load_taxonomy(path)
                .with_context(|| format!("failed to load taxonomy {}", path.display()))?,
            None => Taxonomy::default(),
        };

        let data_path = data_override.unwrap_or(&config.data_path);
        let loaded = load_records(data_path, &taxonomy.markets)
            .with_context(|| format!("failed to load records from {}", data_path.display()))?;
        let records = TargetScope::from_taxonomy(&taxonomy).apply(loaded.records);

        Ok(Self {
            aggregator: FeatureAggregator::from_taxonomy(&taxonomy),
            config,
            taxonomy,
            records,
        })
    }

    /// In-scope records, optionally narrowed to one market (name or alias).
    pub(crate) fn records_in_market(&self, market: Option<&str>) -> Vec<AdvertisementRecord> {
        let Some(market) = market else {
            return self.records.clone();
        };
        let resolved = evads_ingest::resolve_market(market, &self.taxonomy.markets);
        self.records
            .iter()
            .filter(|r| r.market == resolved)
            .cloned()
            .collect()
    }
}

/// ` for vehicle X in market Y`, or empty when unfiltered.
pub(crate) fn filter_suffix(vehicle: Option<&str>, market: Option<&str>) -> String {
    let mut suffix = String::new();
    if let Some(vehicle) = vehicle {
        suffix.push_str(&format!(" for vehicle {vehicle}"));
    }
    if let Some(market) = market {
        suffix.push_str(&format!(" in market {market}"));
    }
    suffix
}
