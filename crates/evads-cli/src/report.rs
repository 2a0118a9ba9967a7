//! Report and export commands.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use evads_analysis::{
    analyze_vehicles, build_vehicle_market_reports, count_keyword_groups, render_markdown_report,
    summarize_markets, MentionQuery,
};
use evads_ingest::{export_all, AnalysisBundle};

use crate::session::Session;

/// Render the per-vehicle, per-market markdown report to `out` or stdout.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub(crate) fn run_report(session: &Session, out: Option<&Path>) -> anyhow::Result<()> {
    let reports = build_vehicle_market_reports(
        &session.aggregator,
        &session.records,
        &session.taxonomy.markets,
    );
    let markdown = render_markdown_report(&reports);

    match out {
        Some(path) => {
            fs::write(path, &markdown)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            println!("report written to {} ({} blocks)", path.display(), reports.len());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

/// Write the CSV exports and the JSON bundle.
///
/// # Errors
///
/// Returns an error if any export file cannot be written.
pub(crate) fn run_export(session: &Session, dir: Option<&Path>) -> anyhow::Result<()> {
    let dir = dir.unwrap_or(&session.config.export_dir);
    let records = &session.records;
    let markets = &session.taxonomy.markets;

    if records.is_empty() {
        println!("no data to export");
        return Ok(());
    }

    let counts = session.aggregator.count_features(records);
    let summaries = summarize_markets(records, markets);
    let vehicles = analyze_vehicles(records, markets, None);
    let themes = count_keyword_groups(records, &session.taxonomy.themes);
    let tones = count_keyword_groups(records, &session.taxonomy.tones);
    let listing = session
        .aggregator
        .feature_mentions_detail(records, &MentionQuery::default());

    let bundle = AnalysisBundle {
        generated_at: Utc::now(),
        total_records: records.len(),
        feature_counts: &counts,
        market_summary: &summaries,
        vehicle_analysis: &vehicles,
        themes: &themes,
        tones: &tones,
    };

    let written = export_all(dir, &bundle, &listing.mentions)
        .with_context(|| format!("failed to export to {}", dir.display()))?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
