//! Feature extraction over EV advertisement annotations.
//!
//! Parses `**Label:** content` sections out of generated annotation text,
//! maps each label onto a [`FeatureCategory`](evads_core::FeatureCategory),
//! gates records and sections on content quality, and aggregates mention
//! counts by vehicle. Also carries the thin market/vehicle summaries and
//! theme/tone keyword counts the presentation layer consumes.

pub mod aggregate;
pub mod categorize;
pub mod quality;
pub mod report;
pub mod sections;
pub mod summary;
pub mod themes;

pub use aggregate::{
    FeatureAggregator, FeatureCounts, FeatureMention, MentionListing, MentionQuery,
};
pub use categorize::{CategoryMapper, LabelMatch};
pub use quality::{QualityFilter, QualityVerdict};
pub use report::{build_vehicle_market_reports, render_markdown_report, VehicleMarketReport};
pub use sections::{parse_sections, Section, Sections};
pub use summary::{
    analyze_vehicles, summarize_markets, vehicle_detail, MarketCount, MarketSummary,
    VehicleDetail, VehicleStats,
};
pub use themes::{count_keyword_groups, KeywordGroupCounts};
