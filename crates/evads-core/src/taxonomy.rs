//! Lookup tables that drive section categorization, quality gating, target
//! scoping, and theme/tone keyword counting.
//!
//! [`Taxonomy::default`] carries the built-in tables. A YAML file loaded
//! through [`load_taxonomy`] may replace any subset of them; omitted keys
//! keep their defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, FeatureCategory};

const SECTION_CATEGORIES: &[(&str, FeatureCategory)] = &[
    ("Brand & Product Focus", FeatureCategory::BrandProductFocus),
    ("Brand & Vehicle Focus", FeatureCategory::BrandProductFocus),
    ("Key Message/Slogan", FeatureCategory::KeyMessage),
    ("Key Message/Value Proposition", FeatureCategory::KeyMessage),
    ("Dealership/Advertiser", FeatureCategory::AdvertiserInfo),
    ("Range and Charging", FeatureCategory::RangeCharging),
    ("Battery and Range", FeatureCategory::RangeCharging),
    ("Charging", FeatureCategory::RangeCharging),
    ("Range", FeatureCategory::RangeCharging),
    ("Performance", FeatureCategory::Performance),
    ("Driving Experience", FeatureCategory::Performance),
    ("Power and Performance", FeatureCategory::Performance),
    ("Interior and Comfort", FeatureCategory::Interior),
    ("Interior", FeatureCategory::Interior),
    ("Comfort", FeatureCategory::Interior),
    ("Cabin", FeatureCategory::Interior),
    ("Infotainment & Audio", FeatureCategory::Technology),
    ("Technology", FeatureCategory::Technology),
    ("Tech Features", FeatureCategory::Technology),
    ("Safety & Assistance", FeatureCategory::Safety),
    ("Safety", FeatureCategory::Safety),
    ("Driver Assistance", FeatureCategory::Safety),
    ("Exterior Design", FeatureCategory::Design),
    ("Design", FeatureCategory::Design),
    ("Styling", FeatureCategory::Design),
    ("Appearance", FeatureCategory::Design),
    ("Eco-Friendly Features", FeatureCategory::EcoFriendly),
    ("Environmental Impact", FeatureCategory::EcoFriendly),
    ("Sustainability", FeatureCategory::EcoFriendly),
    ("Price and Value", FeatureCategory::Price),
    ("Pricing", FeatureCategory::Price),
    ("Cost", FeatureCategory::Price),
    ("Affordability", FeatureCategory::Price),
    ("Connectivity and Digital Experience", FeatureCategory::Technology),
    // Meta-commentary sections, recognized but deliberately de-prioritized.
    ("Overall Theme", FeatureCategory::Other),
    ("Target Audience", FeatureCategory::Other),
    ("Visual Elements", FeatureCategory::Design),
    ("Ad Format", FeatureCategory::Other),
];

const RECORD_BOILERPLATE_PHRASES: &[&str] = &["does not include specific details"];

const RECORD_MIN_LENGTH: usize = 30;

const SUBSTANTIVE_KEYWORDS: &[&str] = &[
    "feature",
    "performance",
    "range",
    "interior",
    "exterior",
    "technology",
    "safety",
    "design",
    "comfort",
    "efficiency",
    "battery",
    "charging",
    "driving",
    "experience",
    "capability",
    "innovation",
    "advanced",
    "premium",
    "luxury",
    "spacious",
    "powerful",
    "fast",
    "smooth",
    "quiet",
    "reliable",
    "eco-friendly",
    "sustainable",
    "modern",
    "sleek",
    "stylish",
    "car",
    "vehicle",
    "auto",
    "model",
    "brand",
    "new",
    "latest",
    "available",
    "offer",
    "features",
    "includes",
    "comes",
    "with",
];

const SECTION_PLACEHOLDER_PHRASES: &[&str] = &[
    "not specified in the ad",
    "not specified",
    "not mentioned",
    "not provided",
    "not available",
    "no specific",
    "no details",
    "not detailed",
    "not discussed in the ad",
    "not discussed",
    "not highlighted",
    "not emphasized",
    "not featured",
    "not shown",
    "not visible",
    "not clear",
    "unclear",
    "no information",
    "no mention",
];

const SECTION_MIN_LENGTH: usize = 15;

const EXCLUDED_SECTION_TERMS: &[&str] = &["dealership", "advertiser"];

const MARKETS: &[(&str, &[&str])] = &[
    ("Portugal", &["PT"]),
    ("Germany", &["DE", "Deutschland"]),
    ("Netherlands", &["NL", "Nederland"]),
];

const TARGET_VEHICLES: &[&str] = &[
    "Hyundai Ioniq 5",
    "VW ID.4",
    "Renault Megane E-Tech",
    "Audi Q4 e-tron",
    "Tesla Model Y",
];

const THEMES: &[(&str, &[&str])] = &[
    ("City", &["city", "urban", "downtown", "street", "metropolitan"]),
    (
        "Country",
        &["country", "rural", "nature", "landscape", "outdoor", "mountain"],
    ),
    (
        "Interior Focus",
        &["interior", "cabin", "dashboard", "seats", "inside"],
    ),
    (
        "Exterior Focus",
        &["exterior", "outside", "body", "design", "profile"],
    ),
    (
        "Lifestyle",
        &["lifestyle", "family", "adventure", "journey", "experience"],
    ),
    ("Commute", &["commute", "work", "daily", "traffic", "business"]),
    (
        "Luxury",
        &["luxury", "premium", "elegant", "sophisticated", "high-end"],
    ),
    (
        "Sport",
        &["sport", "sporty", "dynamic", "performance", "athletic"],
    ),
];

const TONES: &[(&str, &[&str])] = &[
    ("Modern", &["modern", "contemporary", "current", "latest", "new"]),
    (
        "Innovative",
        &[
            "innovative",
            "cutting-edge",
            "advanced",
            "breakthrough",
            "revolutionary",
        ],
    ),
    (
        "Elegant",
        &["elegant", "sophisticated", "refined", "classy", "stylish"],
    ),
    (
        "Energetic",
        &["energetic", "dynamic", "vibrant", "exciting", "powerful"],
    ),
    (
        "Minimalist",
        &["minimalist", "clean", "simple", "sleek", "streamlined"],
    ),
    (
        "Professional",
        &["professional", "business", "corporate", "formal"],
    ),
    (
        "Friendly",
        &["friendly", "approachable", "welcoming", "warm", "inviting"],
    ),
];

/// One exact-match entry of the section label table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMapping {
    pub label: String,
    pub category: FeatureCategory,
}

/// Thresholds and phrase lists for one granularity of quality gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRules {
    /// Minimum trimmed length in characters.
    pub min_length: usize,
    /// Any of these (case-insensitive substring) rejects the text.
    #[serde(default)]
    pub reject_phrases: Vec<String>,
    /// At least one must appear (case-insensitive substring). Empty disables
    /// the check.
    #[serde(default)]
    pub required_keywords: Vec<String>,
}

/// A target market and the alternate spellings that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl MarketConfig {
    /// Returns `true` if `token` is this market's name or one of its aliases,
    /// ignoring case and surrounding whitespace.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        let token = token.trim();
        self.name.eq_ignore_ascii_case(token)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(token))
    }
}

/// A named bucket of keywords (themes, tones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default = "default_section_categories")]
    pub section_categories: Vec<SectionMapping>,
    /// Gate applied to a record's whole annotation text.
    #[serde(default = "default_record_quality")]
    pub record_quality: QualityRules,
    /// Gate applied to each section's content before it is counted.
    #[serde(default = "default_section_quality")]
    pub section_quality: QualityRules,
    /// Section labels containing any of these are left out of drill-down listings.
    #[serde(default = "default_excluded_section_terms")]
    pub excluded_section_terms: Vec<String>,
    #[serde(default = "default_markets")]
    pub markets: Vec<MarketConfig>,
    #[serde(default = "default_target_vehicles")]
    pub target_vehicles: Vec<String>,
    #[serde(default = "default_themes")]
    pub themes: Vec<KeywordGroup>,
    #[serde(default = "default_tones")]
    pub tones: Vec<KeywordGroup>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            section_categories: default_section_categories(),
            record_quality: default_record_quality(),
            section_quality: default_section_quality(),
            excluded_section_terms: default_excluded_section_terms(),
            markets: default_markets(),
            target_vehicles: default_target_vehicles(),
            themes: default_themes(),
            tones: default_tones(),
        }
    }
}

impl Taxonomy {
    /// Canonical market names in configured order.
    #[must_use]
    pub fn market_names(&self) -> Vec<String> {
        self.markets.iter().map(|m| m.name.clone()).collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn keyword_groups(table: &[(&str, &[&str])]) -> Vec<KeywordGroup> {
    table
        .iter()
        .map(|(name, keywords)| KeywordGroup {
            name: (*name).to_string(),
            keywords: strings(keywords),
        })
        .collect()
}

fn default_section_categories() -> Vec<SectionMapping> {
    SECTION_CATEGORIES
        .iter()
        .map(|(label, category)| SectionMapping {
            label: (*label).to_string(),
            category: *category,
        })
        .collect()
}

fn default_record_quality() -> QualityRules {
    QualityRules {
        min_length: RECORD_MIN_LENGTH,
        reject_phrases: strings(RECORD_BOILERPLATE_PHRASES),
        required_keywords: strings(SUBSTANTIVE_KEYWORDS),
    }
}

fn default_section_quality() -> QualityRules {
    QualityRules {
        min_length: SECTION_MIN_LENGTH,
        reject_phrases: strings(SECTION_PLACEHOLDER_PHRASES),
        required_keywords: Vec::new(),
    }
}

fn default_excluded_section_terms() -> Vec<String> {
    strings(EXCLUDED_SECTION_TERMS)
}

fn default_markets() -> Vec<MarketConfig> {
    MARKETS
        .iter()
        .map(|(name, aliases)| MarketConfig {
            name: (*name).to_string(),
            aliases: strings(aliases),
        })
        .collect()
}

fn default_target_vehicles() -> Vec<String> {
    strings(TARGET_VEHICLES)
}

fn default_themes() -> Vec<KeywordGroup> {
    keyword_groups(THEMES)
}

fn default_tones() -> Vec<KeywordGroup> {
    keyword_groups(TONES)
}

/// Load and validate a taxonomy override from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let taxonomy: Taxonomy = serde_yaml::from_str(&content)?;
    validate_taxonomy(&taxonomy)?;

    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &Taxonomy) -> Result<(), ConfigError> {
    let mut seen_labels = HashSet::new();
    for mapping in &taxonomy.section_categories {
        let label = mapping.label.trim();
        if label.is_empty() {
            return Err(ConfigError::Validation(
                "section label must be non-empty".to_string(),
            ));
        }
        if label != mapping.label {
            return Err(ConfigError::Validation(format!(
                "section label '{}' has surrounding whitespace",
                mapping.label
            )));
        }
        if !seen_labels.insert(label) {
            return Err(ConfigError::Validation(format!(
                "duplicate section label: '{label}'"
            )));
        }
    }

    for (name, rules) in [
        ("record_quality", &taxonomy.record_quality),
        ("section_quality", &taxonomy.section_quality),
    ] {
        if rules.min_length == 0 {
            return Err(ConfigError::Validation(format!(
                "{name}.min_length must be greater than zero"
            )));
        }
        validate_entries(&format!("{name}.reject_phrases"), &rules.reject_phrases)?;
        validate_entries(
            &format!("{name}.required_keywords"),
            &rules.required_keywords,
        )?;
    }

    validate_entries("excluded_section_terms", &taxonomy.excluded_section_terms)?;

    let mut seen_markets = HashSet::new();
    for market in &taxonomy.markets {
        if market.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "market name must be non-empty".to_string(),
            ));
        }
        if !seen_markets.insert(market.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate market: '{}'",
                market.name
            )));
        }
        validate_entries(&format!("markets.{}.aliases", market.name), &market.aliases)?;
    }

    validate_entries("target_vehicles", &taxonomy.target_vehicles)?;

    for (kind, groups) in [("themes", &taxonomy.themes), ("tones", &taxonomy.tones)] {
        for group in groups {
            if group.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{kind} entry name must be non-empty"
                )));
            }
            validate_entries(&format!("{kind}.{}", group.name), &group.keywords)?;
        }
    }

    Ok(())
}

fn validate_entries(field: &str, entries: &[String]) -> Result<(), ConfigError> {
    if entries.iter().any(|e| e.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{field} contains an empty entry"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;
