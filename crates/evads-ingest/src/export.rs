//! CSV and JSON export of analysis results.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use evads_analysis::{
    FeatureCounts, FeatureMention, KeywordGroupCounts, MarketSummary, VehicleStats,
};
use evads_core::FeatureCategory;
use serde::Serialize;

use crate::error::IngestError;

pub const FEATURE_COUNTS_FILE: &str = "feature_counts.csv";
pub const FEATURE_MENTIONS_FILE: &str = "feature_mentions.csv";
pub const MARKET_SUMMARY_FILE: &str = "market_summary.csv";
pub const ANALYSIS_JSON_FILE: &str = "analysis.json";

const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize)]
struct FeatureCountRow<'a> {
    #[serde(rename = "Vehicle")]
    vehicle: &'a str,
    #[serde(rename = "Feature_Category")]
    feature_category: FeatureCategory,
    #[serde(rename = "Mention_Count")]
    mention_count: usize,
}

#[derive(Serialize)]
struct MentionRow<'a> {
    #[serde(rename = "Advertiser")]
    advertiser: &'a str,
    #[serde(rename = "Vehicle")]
    vehicle: &'a str,
    #[serde(rename = "Matched_Keyword")]
    matched_keyword: &'a str,
    #[serde(rename = "Feature_Category")]
    feature_category: FeatureCategory,
    #[serde(rename = "Relevant_Text")]
    relevant_text: &'a str,
    #[serde(rename = "Source_Platform")]
    source_platform: &'a str,
}

#[derive(Serialize)]
struct MarketSummaryRow<'a> {
    #[serde(rename = "Market")]
    market: &'a str,
    #[serde(rename = "Total_Ads")]
    total_ads: usize,
    #[serde(rename = "Unique_Vehicles")]
    unique_vehicles: usize,
    #[serde(rename = "Unique_Advertisers")]
    unique_advertisers: usize,
    #[serde(rename = "Date_Start")]
    date_start: String,
    #[serde(rename = "Date_End")]
    date_end: String,
}

/// Everything written to `analysis.json`.
#[derive(Debug, Serialize)]
pub struct AnalysisBundle<'a> {
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub feature_counts: &'a FeatureCounts,
    pub market_summary: &'a [MarketSummary],
    pub vehicle_analysis: &'a BTreeMap<String, VehicleStats>,
    pub themes: &'a KeywordGroupCounts,
    pub tones: &'a KeywordGroupCounts,
}

/// `YYYY-MM`, or `N/A` when absent.
#[must_use]
pub fn format_month(date: Option<NaiveDate>) -> String {
    date.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |d| d.format("%Y-%m").to_string(),
    )
}

/// Writes `Vehicle, Feature_Category, Mention_Count` rows: vehicles in name
/// order, then descending count, then category name.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] if a row cannot be written.
pub fn write_feature_counts<W: io::Write>(
    writer: W,
    counts: &FeatureCounts,
) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for (vehicle, feature_category, mention_count) in counts.rows() {
        csv.serialize(FeatureCountRow {
            vehicle,
            feature_category,
            mention_count,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// # Errors
///
/// Returns the underlying [`csv::Error`] if a row cannot be written.
pub fn write_feature_mentions<W: io::Write>(
    writer: W,
    mentions: &[FeatureMention],
) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for mention in mentions {
        csv.serialize(MentionRow {
            advertiser: &mention.advertiser,
            vehicle: &mention.vehicle_model,
            matched_keyword: &mention.matched_keyword,
            feature_category: mention.feature_category,
            relevant_text: &mention.relevant_text,
            source_platform: &mention.source_platform,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// # Errors
///
/// Returns the underlying [`csv::Error`] if a row cannot be written.
pub fn write_market_summary<W: io::Write>(
    writer: W,
    summaries: &[MarketSummary],
) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv.serialize(MarketSummaryRow {
            market: &summary.market,
            total_ads: summary.total_ads,
            unique_vehicles: summary.unique_vehicles,
            unique_advertisers: summary.unique_advertisers,
            date_start: format_month(summary.date_start),
            date_end: format_month(summary.date_end),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON bundle.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] on serialization or write
/// failure.
pub fn write_analysis_json<W: io::Write>(
    mut writer: W,
    bundle: &AnalysisBundle<'_>,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(&mut writer, bundle)?;
    writer.flush().map_err(serde_json::Error::io)
}

fn create_file(path: &Path) -> Result<io::BufWriter<fs::File>, IngestError> {
    fs::File::create(path)
        .map(io::BufWriter::new)
        .map_err(|e| IngestError::io(path, e))
}

/// Writes the three CSV exports and `analysis.json` into `dir`, creating it
/// if needed. Returns the written paths in write order.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the directory or a file cannot be
/// created, [`IngestError::Csv`] or [`IngestError::Json`] if writing fails.
pub fn export_all(
    dir: &Path,
    bundle: &AnalysisBundle<'_>,
    mentions: &[FeatureMention],
) -> Result<Vec<PathBuf>, IngestError> {
    fs::create_dir_all(dir).map_err(|e| IngestError::io(dir, e))?;

    let counts_path = dir.join(FEATURE_COUNTS_FILE);
    write_feature_counts(create_file(&counts_path)?, bundle.feature_counts)
        .map_err(|e| IngestError::csv(&counts_path, e))?;

    let mentions_path = dir.join(FEATURE_MENTIONS_FILE);
    write_feature_mentions(create_file(&mentions_path)?, mentions)
        .map_err(|e| IngestError::csv(&mentions_path, e))?;

    let summary_path = dir.join(MARKET_SUMMARY_FILE);
    write_market_summary(create_file(&summary_path)?, bundle.market_summary)
        .map_err(|e| IngestError::csv(&summary_path, e))?;

    let json_path = dir.join(ANALYSIS_JSON_FILE);
    write_analysis_json(create_file(&json_path)?, bundle).map_err(|source| IngestError::Json {
        path: json_path.display().to_string(),
        source,
    })?;

    let written = vec![counts_path, mentions_path, summary_path, json_path];
    tracing::info!(dir = %dir.display(), files = written.len(), "exports written");
    Ok(written)
}
