//! Market and vehicle count summaries.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use evads_core::{AdvertisementRecord, MarketConfig, UNKNOWN};
use serde::Serialize;

/// How many sample annotation texts a [`VehicleDetail`] carries.
pub const SAMPLE_SUMMARY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketSummary {
    pub market: String,
    pub total_ads: usize,
    pub unique_vehicles: usize,
    /// Distinct advertiser names, not counting the `"Unknown"` sentinel.
    pub unique_advertisers: usize,
    /// Earliest and latest ad start date seen in the market.
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

#[derive(Default)]
struct MarketAccumulator<'a> {
    total_ads: usize,
    vehicles: BTreeSet<&'a str>,
    advertisers: BTreeSet<&'a str>,
    date_start: Option<NaiveDate>,
    date_end: Option<NaiveDate>,
}

impl<'a> MarketAccumulator<'a> {
    fn add(&mut self, record: &'a AdvertisementRecord) {
        self.total_ads += 1;
        self.vehicles.insert(&record.vehicle_model);
        if record.advertiser_name != UNKNOWN {
            self.advertisers.insert(&record.advertiser_name);
        }
        if let Some(date) = record.start_date {
            self.date_start = Some(self.date_start.map_or(date, |d| d.min(date)));
            self.date_end = Some(self.date_end.map_or(date, |d| d.max(date)));
        }
    }
}

/// One summary per configured market that has at least one record, in
/// configured order.
pub fn summarize_markets<'a, I>(records: I, markets: &[MarketConfig]) -> Vec<MarketSummary>
where
    I: IntoIterator<Item = &'a AdvertisementRecord>,
{
    let mut accumulators: Vec<MarketAccumulator<'a>> =
        markets.iter().map(|_| MarketAccumulator::default()).collect();

    for record in records {
        if let Some(index) = markets.iter().position(|m| m.matches(&record.market)) {
            accumulators[index].add(record);
        }
    }

    markets
        .iter()
        .zip(accumulators)
        .filter(|(_, acc)| acc.total_ads > 0)
        .map(|(market, acc)| MarketSummary {
            market: market.name.clone(),
            total_ads: acc.total_ads,
            unique_vehicles: acc.vehicles.len(),
            unique_advertisers: acc.advertisers.len(),
            date_start: acc.date_start,
            date_end: acc.date_end,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketCount {
    pub market: String,
    pub ads: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStats {
    pub total_ads: usize,
    /// Configured markets with at least one ad for the vehicle.
    pub market_breakdown: Vec<MarketCount>,
    pub advertisers: Vec<String>,
    /// Mean over records that report spend; `0.0` when none do.
    pub avg_spend: f64,
}

/// Per-vehicle statistics for every known vehicle, optionally restricted to
/// one market.
pub fn analyze_vehicles<'a, I>(
    records: I,
    markets: &[MarketConfig],
    market_filter: Option<&str>,
) -> BTreeMap<String, VehicleStats>
where
    I: IntoIterator<Item = &'a AdvertisementRecord>,
{
    let mut grouped: BTreeMap<&str, Vec<&AdvertisementRecord>> = BTreeMap::new();
    for record in records {
        if !record.has_known_vehicle() || !in_market(record, market_filter) {
            continue;
        }
        grouped.entry(&record.vehicle_model).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(vehicle, ads)| {
            let market_breakdown = markets
                .iter()
                .filter_map(|market| {
                    let count = ads.iter().filter(|r| market.matches(&r.market)).count();
                    (count > 0).then(|| MarketCount {
                        market: market.name.clone(),
                        ads: count,
                    })
                })
                .collect();

            let stats = VehicleStats {
                total_ads: ads.len(),
                market_breakdown,
                advertisers: advertisers(&ads),
                avg_spend: mean(ads.iter().filter_map(|r| r.spend)),
            };
            (vehicle.to_string(), stats)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetail {
    pub vehicle_model: String,
    pub market: Option<String>,
    pub total_ads: usize,
    pub advertisers: Vec<String>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub sample_summaries: Vec<String>,
    pub avg_spend: f64,
    pub total_reach: f64,
}

/// Drill-down for one vehicle. Returns `None` when nothing matches.
pub fn vehicle_detail<'a, I>(
    records: I,
    vehicle: &str,
    market: Option<&str>,
) -> Option<VehicleDetail>
where
    I: IntoIterator<Item = &'a AdvertisementRecord>,
{
    let ads: Vec<&AdvertisementRecord> = records
        .into_iter()
        .filter(|r| r.vehicle_model == vehicle && in_market(r, market))
        .collect();
    if ads.is_empty() {
        return None;
    }

    let dates = ads.iter().filter_map(|r| r.start_date);
    Some(VehicleDetail {
        vehicle_model: vehicle.to_string(),
        market: market.map(str::to_string),
        total_ads: ads.len(),
        advertisers: advertisers(&ads),
        date_start: dates.clone().min(),
        date_end: dates.max(),
        sample_summaries: ads
            .iter()
            .filter_map(|r| r.annotation())
            .take(SAMPLE_SUMMARY_LIMIT)
            .map(str::to_string)
            .collect(),
        avg_spend: mean(ads.iter().filter_map(|r| r.spend)),
        total_reach: ads.iter().filter_map(|r| r.reach_estimate).sum(),
    })
}

fn in_market(record: &AdvertisementRecord, market: Option<&str>) -> bool {
    market.is_none_or(|m| record.market.eq_ignore_ascii_case(m.trim()))
}

fn advertisers(ads: &[&AdvertisementRecord]) -> Vec<String> {
    ads.iter()
        .map(|r| r.advertiser_name.as_str())
        .filter(|name| *name != UNKNOWN)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
