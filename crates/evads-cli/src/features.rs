//! Feature count and mention drill-down commands.

use evads_analysis::MentionQuery;
use evads_core::FeatureCategory;

use crate::session::{filter_suffix, Session};

const TEXT_PREVIEW_CHARS: usize = 160;

/// Print per-vehicle category counts, highest first.
pub(crate) fn run_features(session: &Session, vehicle: Option<&str>, market: Option<&str>) {
    let records = session.records_in_market(market);
    let mut counts = session.aggregator.count_features(&records);
    if let Some(vehicle) = vehicle {
        counts = counts.restricted_to(vehicle);
    }

    if counts.is_empty() {
        println!(
            "no feature mentions found{}",
            filter_suffix(vehicle, market)
        );
        return;
    }

    println!("{:<26}{:<24}MENTIONS", "VEHICLE", "CATEGORY");
    for (vehicle, category, count) in counts.rows() {
        println!("{vehicle:<26}{:<24}{count}", category.as_str());
    }
}

/// Print the quality-filtered, de-duplicated mentions of one category.
pub(crate) fn run_mentions(
    session: &Session,
    category: FeatureCategory,
    vehicle: Option<&str>,
    all: bool,
) {
    let mut query = MentionQuery::category(category);
    if let Some(vehicle) = vehicle {
        query = query.for_vehicle(vehicle);
    }
    let listing = session
        .aggregator
        .feature_mentions_detail(&session.records, &query);

    if listing.mentions.is_empty() {
        println!(
            "no {category} mentions found{}",
            filter_suffix(vehicle, None)
        );
        return;
    }

    let limit = if all {
        listing.mentions.len()
    } else {
        session.config.mention_display_limit
    };
    println!(
        "{category}: {} quality mentions ({} before filtering), showing {}",
        listing.mentions.len(),
        listing.total_before_filter,
        limit.min(listing.mentions.len())
    );
    println!();

    for mention in listing.mentions.iter().take(limit) {
        println!(
            "[{}] {} via {} | {}",
            mention.vehicle_model, mention.advertiser, mention.source_platform, mention.matched_keyword
        );
        println!("    {}", preview(&mention.relevant_text));
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > TEXT_PREVIEW_CHARS {
        format!("{}...", text.chars().take(TEXT_PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}
