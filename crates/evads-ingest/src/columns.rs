//! Column-name normalization from export CSV rows to [`AdvertisementRecord`].
//!
//! Exports from different collection runs spell the same attribute
//! differently. Each logical column lists its accepted spellings in
//! preference order; per row, the first non-blank value wins.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use evads_core::{AdvertisementRecord, MarketConfig, UNKNOWN};

use crate::error::IngestError;

pub const ANNOTATION_COLUMNS: &[&str] = &["openai_analysis", "openai_summary"];
pub const VEHICLE_COLUMNS: &[&str] = &["matched_cars", "matched_car_models"];
pub const MARKET_COLUMNS: &[&str] = &["country", "targeted_countries_list"];
pub const ADVERTISER_COLUMNS: &[&str] = &["advertiser_name", "page_name"];
pub const PLATFORM_COLUMNS: &[&str] = &["source_platform"];
pub const START_DATE_COLUMNS: &[&str] = &["start_date"];
pub const END_DATE_COLUMNS: &[&str] = &["end_date"];
pub const IMAGE_URL_COLUMNS: &[&str] = &["image_url", "first_image_url"];
pub const SPEND_COLUMNS: &[&str] = &["spend"];
pub const REACH_COLUMNS: &[&str] = &["reach_estimate"];
pub const AD_ID_COLUMNS: &[&str] = &["ad_archive_id", "creative_id"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Header positions of every logical column present in one CSV file.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    annotation: Vec<usize>,
    vehicle: Vec<usize>,
    market: Vec<usize>,
    advertiser: Vec<usize>,
    platform: Vec<usize>,
    start_date: Vec<usize>,
    end_date: Vec<usize>,
    image_url: Vec<usize>,
    spend: Vec<usize>,
    reach: Vec<usize>,
    ad_id: Vec<usize>,
}

fn positions(headers: &StringRecord, candidates: &[&str]) -> Vec<usize> {
    candidates
        .iter()
        .filter_map(|name| headers.iter().position(|h| h.trim() == *name))
        .collect()
}

impl ColumnLayout {
    /// Resolves header positions for `headers` read from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingColumn`] if no annotation column is
    /// present under any accepted name. Every other column is optional.
    pub fn from_headers(headers: &StringRecord, source: &Path) -> Result<Self, IngestError> {
        let annotation = positions(headers, ANNOTATION_COLUMNS);
        if annotation.is_empty() {
            return Err(IngestError::MissingColumn {
                path: source.display().to_string(),
                logical: "annotation",
                candidates: ANNOTATION_COLUMNS.join(", "),
            });
        }

        Ok(Self {
            annotation,
            vehicle: positions(headers, VEHICLE_COLUMNS),
            market: positions(headers, MARKET_COLUMNS),
            advertiser: positions(headers, ADVERTISER_COLUMNS),
            platform: positions(headers, PLATFORM_COLUMNS),
            start_date: positions(headers, START_DATE_COLUMNS),
            end_date: positions(headers, END_DATE_COLUMNS),
            image_url: positions(headers, IMAGE_URL_COLUMNS),
            spend: positions(headers, SPEND_COLUMNS),
            reach: positions(headers, REACH_COLUMNS),
            ad_id: positions(headers, AD_ID_COLUMNS),
        })
    }

    /// Builds the canonical record for one data row.
    #[must_use]
    pub fn to_record(&self, row: &StringRecord, markets: &[MarketConfig]) -> AdvertisementRecord {
        let or_unknown = |columns: &[usize]| {
            first_present(row, columns).unwrap_or(UNKNOWN).to_string()
        };

        AdvertisementRecord {
            vehicle_model: or_unknown(self.vehicle.as_slice()),
            market: first_present(row, &self.market).map_or_else(
                || UNKNOWN.to_string(),
                |raw| resolve_market(raw, markets),
            ),
            advertiser_name: or_unknown(self.advertiser.as_slice()),
            annotation_text: first_present(row, &self.annotation).map(str::to_string),
            start_date: first_present(row, &self.start_date).and_then(parse_date),
            end_date: first_present(row, &self.end_date).and_then(parse_date),
            image_url: first_present(row, &self.image_url).map(str::to_string),
            source_platform: or_unknown(self.platform.as_slice()),
            spend: first_present(row, &self.spend).and_then(parse_number),
            reach_estimate: first_present(row, &self.reach).and_then(parse_number),
            ad_id: first_present(row, &self.ad_id).map(str::to_string),
        }
    }
}

fn first_present<'r>(row: &'r StringRecord, columns: &[usize]) -> Option<&'r str> {
    columns
        .iter()
        .filter_map(|&i| row.get(i))
        .map(str::trim)
        .find(|value| !value.is_empty() && !is_null_marker(value))
}

fn is_null_marker(value: &str) -> bool {
    matches!(value, "nan" | "NaN" | "None" | "null")
}

/// Maps a raw market value onto a configured market name.
///
/// The whole trimmed value is tried first, then each alphanumeric token, so
/// `"DE"`, `"germany"` and `"['DE', 'AT']"` all resolve to `"Germany"` while
/// `"Sweden"` does not. Unresolved values come back trimmed.
#[must_use]
pub fn resolve_market(raw: &str, markets: &[MarketConfig]) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return UNKNOWN.to_string();
    }
    if let Some(market) = markets.iter().find(|m| m.matches(raw)) {
        return market.name.clone();
    }

    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .find_map(|token| markets.iter().find(|m| m.matches(token)))
        .map_or_else(|| raw.to_string(), |m| m.name.clone())
}

/// Parses a date or datetime cell down to its calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evads_core::Taxonomy;

    fn markets() -> Vec<MarketConfig> {
        Taxonomy::default().markets
    }

    fn layout(headers: &[&str]) -> ColumnLayout {
        ColumnLayout::from_headers(&StringRecord::from(headers.to_vec()), Path::new("t.csv"))
            .expect("layout")
    }

    #[test]
    fn missing_annotation_column_is_an_error() {
        let headers = StringRecord::from(vec!["matched_cars", "country"]);
        let err = ColumnLayout::from_headers(&headers, Path::new("ads.csv"))
            .expect_err("annotation column required");
        assert!(matches!(err, IngestError::MissingColumn { logical: "annotation", .. }));
        assert!(err.to_string().contains("openai_analysis, openai_summary"));
    }

    #[test]
    fn preferred_spellings_win_and_blanks_fall_back() {
        let layout = layout(&[
            "openai_summary",
            "openai_analysis",
            "matched_car_models",
            "page_name",
        ]);
        let row = StringRecord::from(vec![
            "summary text",
            "  ",
            "VW ID.4",
            "Volkswagen",
        ]);
        let record = layout.to_record(&row, &markets());
        assert_eq!(record.annotation_text.as_deref(), Some("summary text"));
        assert_eq!(record.vehicle_model, "VW ID.4");
        assert_eq!(record.advertiser_name, "Volkswagen");
        assert_eq!(record.market, UNKNOWN);
        assert_eq!(record.source_platform, UNKNOWN);
    }

    #[test]
    fn analysis_column_preferred_over_summary() {
        let layout = layout(&["openai_summary", "openai_analysis"]);
        let row = StringRecord::from(vec!["old", "new"]);
        let record = layout.to_record(&row, &markets());
        assert_eq!(record.annotation_text.as_deref(), Some("new"));
    }

    #[test]
    fn optional_columns_are_parsed() {
        let layout = layout(&[
            "openai_analysis",
            "start_date",
            "end_date",
            "spend",
            "reach_estimate",
            "first_image_url",
            "creative_id",
        ]);
        let row = StringRecord::from(vec![
            "text",
            "2024-03-05 10:30:00",
            "garbage",
            "1,250.5",
            "nan",
            "https://cdn.example/img.jpg",
            "cr-42",
        ]);
        let record = layout.to_record(&row, &markets());
        assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.end_date, None);
        assert_eq!(record.spend, Some(1250.5));
        assert_eq!(record.reach_estimate, None);
        assert_eq!(record.image_url.as_deref(), Some("https://cdn.example/img.jpg"));
        assert_eq!(record.ad_id.as_deref(), Some("cr-42"));
    }

    #[test]
    fn market_aliases_resolve_on_whole_tokens() {
        let markets = markets();
        assert_eq!(resolve_market("DE", &markets), "Germany");
        assert_eq!(resolve_market(" germany ", &markets), "Germany");
        assert_eq!(resolve_market("Nederland", &markets), "Netherlands");
        assert_eq!(resolve_market("['PT', 'ES']", &markets), "Portugal");
        assert_eq!(resolve_market("Sweden", &markets), "Sweden");
        assert_eq!(resolve_market("Denmark", &markets), "Denmark");
        assert_eq!(resolve_market("   ", &markets), UNKNOWN);
    }

    #[test]
    fn dates_accept_common_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 2);
        assert_eq!(parse_date("2024-11-02"), expected);
        assert_eq!(parse_date("2024-11-02T08:15:00"), expected);
        assert_eq!(parse_date("2024-11-02T08:15:00+01:00"), expected);
        assert_eq!(parse_date("02/11/2024"), None);
    }
}
