//! Market, vehicle and theme/tone summary commands.

use evads_analysis::{
    analyze_vehicles, count_keyword_groups, summarize_markets, vehicle_detail, KeywordGroupCounts,
};
use evads_core::KeywordGroup;
use evads_ingest::format_month;

use crate::session::{filter_suffix, Session};

pub(crate) fn run_markets(session: &Session, market: Option<&str>) {
    let markets: Vec<_> = session
        .taxonomy
        .markets
        .iter()
        .filter(|m| market.is_none_or(|wanted| m.matches(wanted)))
        .cloned()
        .collect();
    let summaries = summarize_markets(&session.records, &markets);

    if summaries.is_empty() {
        println!("no advertisements found{}", filter_suffix(None, market));
        return;
    }

    println!(
        "{:<14}{:<8}{:<10}{:<13}{:<10}END",
        "MARKET", "ADS", "VEHICLES", "ADVERTISERS", "START"
    );
    for s in &summaries {
        println!(
            "{:<14}{:<8}{:<10}{:<13}{:<10}{}",
            s.market,
            s.total_ads,
            s.unique_vehicles,
            s.unique_advertisers,
            format_month(s.date_start),
            format_month(s.date_end)
        );
    }
}

/// Vehicle table, or the detailed view when `vehicle` is given.
pub(crate) fn run_vehicles(session: &Session, market: Option<&str>, vehicle: Option<&str>) {
    if let Some(vehicle) = vehicle {
        print_vehicle_detail(session, vehicle, market);
        return;
    }

    let stats = analyze_vehicles(&session.records, &session.taxonomy.markets, market);
    if stats.is_empty() {
        println!("no vehicles found{}", filter_suffix(None, market));
        return;
    }

    println!("{:<26}{:<8}{:<12}MARKETS", "VEHICLE", "ADS", "AVG SPEND");
    for (name, s) in &stats {
        let breakdown = s
            .market_breakdown
            .iter()
            .map(|m| format!("{} {}", m.market, m.ads))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{name:<26}{:<8}{:<12.2}{breakdown}",
            s.total_ads, s.avg_spend
        );
    }
}

fn print_vehicle_detail(session: &Session, vehicle: &str, market: Option<&str>) {
    let Some(detail) = vehicle_detail(&session.records, vehicle, market) else {
        println!("no data{}", filter_suffix(Some(vehicle), market));
        return;
    };

    println!("Vehicle: {}", detail.vehicle_model);
    if let Some(market) = &detail.market {
        println!("Market: {market}");
    }
    println!("Total ads: {}", detail.total_ads);
    println!(
        "Date range: {} to {}",
        format_month(detail.date_start),
        format_month(detail.date_end)
    );
    println!("Average spend: {:.2}", detail.avg_spend);
    println!("Total reach: {:.0}", detail.total_reach);
    println!("Advertisers: {}", detail.advertisers.join(", "));

    if !detail.sample_summaries.is_empty() {
        println!();
        println!("Sample annotations:");
        for (i, sample) in detail.sample_summaries.iter().enumerate() {
            println!("{}. {sample}", i + 1);
        }
    }
}

pub(crate) fn run_themes(session: &Session) {
    let themes = count_keyword_groups(&session.records, &session.taxonomy.themes);
    let tones = count_keyword_groups(&session.records, &session.taxonomy.tones);

    if themes.is_empty() && tones.is_empty() {
        println!("no theme or tone keywords found");
        return;
    }

    print_group_table("THEME", &themes, &session.taxonomy.themes);
    println!();
    print_group_table("TONE", &tones, &session.taxonomy.tones);
}

fn print_group_table(heading: &str, counts: &KeywordGroupCounts, groups: &[KeywordGroup]) {
    println!("{:<26}{heading:<18}RECORDS", "VEHICLE");
    for (vehicle, by_group) in counts.iter() {
        for group in groups {
            if let Some(count) = by_group.get(&group.name) {
                println!("{vehicle:<26}{:<18}{count}", group.name);
            }
        }
    }
}
