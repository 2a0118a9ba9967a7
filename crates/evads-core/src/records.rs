use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel used wherever an optional text attribute is absent.
pub const UNKNOWN: &str = "Unknown";

/// One advertisement row in canonical shape.
///
/// Ingestion resolves the alternate column spellings once, so analysis code
/// only ever sees these field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementRecord {
    /// Matched vehicle model, e.g. `"Tesla Model Y"`; `"Unknown"` when absent.
    pub vehicle_model: String,
    /// Canonical market name, e.g. `"Germany"`; `"Unknown"` when absent.
    pub market: String,
    pub advertiser_name: String,
    /// Generated analysis text with `**Label:** content` sections.
    pub annotation_text: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    /// Source tag such as `"google"` or `"facebook"`.
    pub source_platform: String,
    pub spend: Option<f64>,
    pub reach_estimate: Option<f64>,
    /// Platform ad identifier (archive id or creative id).
    pub ad_id: Option<String>,
}

impl AdvertisementRecord {
    /// Creates a record for `vehicle_model` in `market` with every optional
    /// attribute absent.
    #[must_use]
    pub fn new(vehicle_model: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            vehicle_model: vehicle_model.into(),
            market: market.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, text: impl Into<String>) -> Self {
        self.annotation_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_advertiser(mut self, name: impl Into<String>) -> Self {
        self.advertiser_name = name.into();
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.source_platform = platform.into();
        self
    }

    /// Annotation text, treating blank strings as absent.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation_text
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    #[must_use]
    pub fn has_known_vehicle(&self) -> bool {
        !self.vehicle_model.is_empty() && self.vehicle_model != UNKNOWN
    }
}

impl Default for AdvertisementRecord {
    fn default() -> Self {
        Self {
            vehicle_model: UNKNOWN.to_string(),
            market: UNKNOWN.to_string(),
            advertiser_name: UNKNOWN.to_string(),
            annotation_text: None,
            start_date: None,
            end_date: None,
            image_url: None,
            source_platform: UNKNOWN.to_string(),
            spend: None,
            reach_estimate: None,
            ad_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fills_unknown_sentinels() {
        let record = AdvertisementRecord::default();
        assert_eq!(record.vehicle_model, UNKNOWN);
        assert_eq!(record.market, UNKNOWN);
        assert_eq!(record.advertiser_name, UNKNOWN);
        assert_eq!(record.source_platform, UNKNOWN);
        assert!(!record.has_known_vehicle());
    }

    #[test]
    fn blank_annotation_reads_as_absent() {
        let record = AdvertisementRecord::new("VW ID.4", "Germany").with_annotation("  \n ");
        assert!(record.annotation().is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let record = AdvertisementRecord::new("VW ID.4", "Germany")
            .with_annotation("**Range:** 520 km")
            .with_advertiser("Autohaus Nord")
            .with_platform("facebook");
        assert_eq!(record.annotation(), Some("**Range:** 520 km"));
        assert_eq!(record.advertiser_name, "Autohaus Nord");
        assert_eq!(record.source_platform, "facebook");
        assert!(record.has_known_vehicle());
    }
}
