mod features;
mod report;
mod session;
mod summaries;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use evads_core::FeatureCategory;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "evads")]
#[command(about = "Feature analysis for EV advertisement annotations")]
struct Cli {
    /// CSV file or chunk directory to load (overrides `EVADS_DATA_PATH`)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Taxonomy YAML file (overrides `EVADS_TAXONOMY_PATH`)
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Per-vehicle feature category mention counts
    Features {
        /// Restrict to one vehicle model
        #[arg(long)]
        vehicle: Option<String>,

        /// Restrict to one market
        #[arg(long)]
        market: Option<String>,
    },
    /// Quality-filtered mentions of one feature category
    Mentions {
        /// Feature category, e.g. "Range & Charging"
        #[arg(long)]
        category: FeatureCategory,

        /// Restrict to one vehicle model
        #[arg(long)]
        vehicle: Option<String>,

        /// Print every mention instead of the configured display limit
        #[arg(long)]
        all: bool,
    },
    /// Ad counts, vehicles, advertisers and date range per market
    Markets {
        #[arg(long)]
        market: Option<String>,
    },
    /// Per-vehicle ad statistics, or a detailed view of one vehicle
    Vehicles {
        #[arg(long)]
        market: Option<String>,

        #[arg(long)]
        vehicle: Option<String>,
    },
    /// Theme and tone keyword counts per vehicle
    Themes,
    /// Markdown report per vehicle and market
    Report {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write CSV and JSON exports
    Export {
        /// Output directory (overrides `EVADS_EXPORT_DIR`)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = evads_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, command = ?cli.command, "starting");

    let session = Session::open(config, cli.data.as_deref(), cli.taxonomy.as_deref())?;

    match cli.command {
        Commands::Features { vehicle, market } => {
            features::run_features(&session, vehicle.as_deref(), market.as_deref());
        }
        Commands::Mentions {
            category,
            vehicle,
            all,
        } => features::run_mentions(&session, category, vehicle.as_deref(), all),
        Commands::Markets { market } => summaries::run_markets(&session, market.as_deref()),
        Commands::Vehicles { market, vehicle } => {
            summaries::run_vehicles(&session, market.as_deref(), vehicle.as_deref());
        }
        Commands::Themes => summaries::run_themes(&session),
        Commands::Report { out } => report::run_report(&session, out.as_deref())?,
        Commands::Export { dir } => report::run_export(&session, dir.as_deref())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
