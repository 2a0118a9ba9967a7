use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Canonical topic bucket that raw section labels collapse into.
///
/// The set is closed. Labels with no entry in the mapping table land in
/// [`FeatureCategory::Other`], which is excluded from meaningful counts but
/// kept for drill-down views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeatureCategory {
    #[serde(rename = "Range & Charging")]
    RangeCharging,
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Interior")]
    Interior,
    #[serde(rename = "Technology")]
    Technology,
    #[serde(rename = "Safety")]
    Safety,
    #[serde(rename = "Design")]
    Design,
    #[serde(rename = "Eco-Friendly")]
    EcoFriendly,
    #[serde(rename = "Price")]
    Price,
    #[serde(rename = "Brand & Product Focus")]
    BrandProductFocus,
    #[serde(rename = "Key Message")]
    KeyMessage,
    #[serde(rename = "Advertiser Info")]
    AdvertiserInfo,
    #[serde(rename = "Other")]
    Other,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 12] = [
        FeatureCategory::RangeCharging,
        FeatureCategory::Performance,
        FeatureCategory::Interior,
        FeatureCategory::Technology,
        FeatureCategory::Safety,
        FeatureCategory::Design,
        FeatureCategory::EcoFriendly,
        FeatureCategory::Price,
        FeatureCategory::BrandProductFocus,
        FeatureCategory::KeyMessage,
        FeatureCategory::AdvertiserInfo,
        FeatureCategory::Other,
    ];

    /// Display label, e.g. `"Range & Charging"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureCategory::RangeCharging => "Range & Charging",
            FeatureCategory::Performance => "Performance",
            FeatureCategory::Interior => "Interior",
            FeatureCategory::Technology => "Technology",
            FeatureCategory::Safety => "Safety",
            FeatureCategory::Design => "Design",
            FeatureCategory::EcoFriendly => "Eco-Friendly",
            FeatureCategory::Price => "Price",
            FeatureCategory::BrandProductFocus => "Brand & Product Focus",
            FeatureCategory::KeyMessage => "Key Message",
            FeatureCategory::AdvertiserInfo => "Advertiser Info",
            FeatureCategory::Other => "Other",
        }
    }

    /// Everything except the `Other` catch-all counts toward feature totals.
    #[must_use]
    pub fn is_meaningful(self) -> bool {
        self != FeatureCategory::Other
    }
}

impl std::fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FeatureCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_canonical_labels() {
        assert_eq!(FeatureCategory::RangeCharging.to_string(), "Range & Charging");
        assert_eq!(FeatureCategory::EcoFriendly.to_string(), "Eco-Friendly");
        assert_eq!(
            FeatureCategory::BrandProductFocus.to_string(),
            "Brand & Product Focus"
        );
    }

    #[test]
    fn from_str_round_trips_every_category() {
        for category in FeatureCategory::ALL {
            assert_eq!(category.as_str().parse::<FeatureCategory>().unwrap(), category);
        }
    }

    #[test]
    fn from_str_is_case_insensitive_and_trims() {
        assert_eq!(
            "  safety ".parse::<FeatureCategory>().unwrap(),
            FeatureCategory::Safety
        );
    }

    #[test]
    fn from_str_rejects_unknown_label() {
        let err = "Horsepower".parse::<FeatureCategory>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory(ref s) if s == "Horsepower"));
    }

    #[test]
    fn only_other_is_not_meaningful() {
        let meaningless: Vec<_> = FeatureCategory::ALL
            .into_iter()
            .filter(|c| !c.is_meaningful())
            .collect();
        assert_eq!(meaningless, vec![FeatureCategory::Other]);
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&FeatureCategory::RangeCharging).unwrap();
        assert_eq!(json, "\"Range & Charging\"");
        let back: FeatureCategory = serde_json::from_str("\"Key Message\"").unwrap();
        assert_eq!(back, FeatureCategory::KeyMessage);
    }
}
