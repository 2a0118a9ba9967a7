//! Loading advertisement exports into canonical records, scoping them to
//! the target markets and vehicles, and writing analysis results back out.

pub mod columns;
pub mod error;
pub mod export;
pub mod load;
pub mod scope;

pub use columns::{parse_date, resolve_market, ColumnLayout};
pub use error::IngestError;
pub use export::{
    export_all, format_month, write_analysis_json, write_feature_counts, write_feature_mentions,
    write_market_summary, AnalysisBundle,
};
pub use load::{chunk_files, load_records, read_csv, LoadedRecords, CHUNK_METADATA_FILE};
pub use scope::TargetScope;
