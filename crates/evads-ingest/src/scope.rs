use evads_analysis::QualityFilter;
use evads_core::{AdvertisementRecord, MarketConfig, Taxonomy};

/// The markets, vehicles and minimum annotation quality an analysis run is
/// restricted to. Every summary downstream works on the records this keeps.
#[derive(Debug, Clone)]
pub struct TargetScope {
    markets: Vec<MarketConfig>,
    vehicles: Vec<String>,
    record_filter: QualityFilter,
}

impl TargetScope {
    #[must_use]
    pub fn new(
        markets: Vec<MarketConfig>,
        vehicles: Vec<String>,
        record_filter: QualityFilter,
    ) -> Self {
        Self {
            markets,
            vehicles,
            record_filter,
        }
    }

    #[must_use]
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        Self::new(
            taxonomy.markets.clone(),
            taxonomy.target_vehicles.clone(),
            QualityFilter::new(&taxonomy.record_quality),
        )
    }

    #[must_use]
    pub fn markets(&self) -> &[MarketConfig] {
        &self.markets
    }

    #[must_use]
    pub fn vehicles(&self) -> &[String] {
        &self.vehicles
    }

    /// Market must resolve to a target market, vehicle must match a target
    /// vehicle exactly, and the annotation must pass the record quality gate.
    #[must_use]
    pub fn contains(&self, record: &AdvertisementRecord) -> bool {
        self.markets.iter().any(|m| m.matches(&record.market))
            && self.vehicles.iter().any(|v| *v == record.vehicle_model)
            && self.record_filter.admits(record.annotation())
    }

    /// Keeps only in-scope records.
    #[must_use]
    pub fn apply(&self, records: Vec<AdvertisementRecord>) -> Vec<AdvertisementRecord> {
        let before = records.len();
        let kept: Vec<AdvertisementRecord> =
            records.into_iter().filter(|r| self.contains(r)).collect();
        tracing::info!(
            before,
            after = kept.len(),
            "filtered to target markets, vehicles and quality content"
        );
        kept
    }
}

impl Default for TargetScope {
    fn default() -> Self {
        Self::from_taxonomy(&Taxonomy::default())
    }
}
