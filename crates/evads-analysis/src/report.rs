//! Per-vehicle, per-market markdown report.

use std::fmt;

use evads_core::{AdvertisementRecord, FeatureCategory, MarketConfig};
use serde::Serialize;

use crate::aggregate::FeatureAggregator;

/// How many raw section labels each report block lists.
pub const TOP_LABEL_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleMarketReport {
    pub vehicle_model: String,
    pub market: String,
    pub total_ads: usize,
    /// Highest count first, ties by category name.
    pub categories: Vec<(FeatureCategory, usize)>,
    /// Most frequent counted section labels, highest first.
    pub top_labels: Vec<(String, usize)>,
}

/// One report block for every known vehicle and configured market pair that
/// has at least one ad. Vehicles are in name order, markets in configured
/// order.
#[must_use]
pub fn build_vehicle_market_reports(
    aggregator: &FeatureAggregator,
    records: &[AdvertisementRecord],
    markets: &[MarketConfig],
) -> Vec<VehicleMarketReport> {
    let mut vehicles: Vec<&str> = records
        .iter()
        .filter(|r| r.has_known_vehicle())
        .map(|r| r.vehicle_model.as_str())
        .collect();
    vehicles.sort_unstable();
    vehicles.dedup();

    let mut reports = Vec::new();
    for vehicle in vehicles {
        for market in markets {
            let subset: Vec<AdvertisementRecord> = records
                .iter()
                .filter(|r| r.vehicle_model == vehicle && market.matches(&r.market))
                .cloned()
                .collect();
            if subset.is_empty() {
                continue;
            }

            let categories = aggregator.count_features(&subset).ranked(vehicle);
            let mut top_labels: Vec<(String, usize)> =
                aggregator.section_label_counts(&subset).into_iter().collect();
            top_labels.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            top_labels.truncate(TOP_LABEL_LIMIT);

            reports.push(VehicleMarketReport {
                vehicle_model: vehicle.to_string(),
                market: market.name.clone(),
                total_ads: subset.len(),
                categories,
                top_labels,
            });
        }
    }

    tracing::debug!(blocks = reports.len(), "vehicle/market reports built");
    reports
}

struct MarkdownReport<'a>(&'a [VehicleMarketReport]);

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# EV Advertisement Feature Report")?;
        if self.0.is_empty() {
            writeln!(f)?;
            return writeln!(f, "_No data for the selected records._");
        }

        let mut current_vehicle: Option<&str> = None;
        for report in self.0 {
            if current_vehicle != Some(report.vehicle_model.as_str()) {
                writeln!(f)?;
                writeln!(f, "## {}", report.vehicle_model)?;
                current_vehicle = Some(report.vehicle_model.as_str());
            }

            writeln!(f)?;
            writeln!(f, "### {}", report.market)?;
            writeln!(f)?;
            writeln!(f, "Total ads: {}", report.total_ads)?;
            writeln!(f)?;

            if report.categories.is_empty() {
                writeln!(f, "_No qualifying feature mentions._")?;
            } else {
                writeln!(f, "| Feature Category | Mentions |")?;
                writeln!(f, "|---|---|")?;
                for (category, count) in &report.categories {
                    writeln!(f, "| {category} | {count} |")?;
                }
            }

            if !report.top_labels.is_empty() {
                writeln!(f)?;
                writeln!(f, "Top section labels:")?;
                for (rank, (label, count)) in report.top_labels.iter().enumerate() {
                    writeln!(f, "{}. {label} ({count})", rank + 1)?;
                }
            }
        }
        Ok(())
    }
}

#[must_use]
pub fn render_markdown_report(reports: &[VehicleMarketReport]) -> String {
    MarkdownReport(reports).to_string()
}
