//! Shared types and configuration for the EV advertisement analysis workspace.
//!
//! Holds the canonical [`AdvertisementRecord`] shape produced by ingestion,
//! the closed [`FeatureCategory`] set, the [`Taxonomy`] tables that drive
//! section categorization and quality gating, and environment-driven
//! [`AppConfig`].

pub mod app_config;
pub mod category;
pub mod config;
pub mod error;
pub mod records;
pub mod taxonomy;

pub use app_config::{AppConfig, Environment};
pub use category::FeatureCategory;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use records::{AdvertisementRecord, UNKNOWN};
pub use taxonomy::{
    load_taxonomy, KeywordGroup, MarketConfig, QualityRules, SectionMapping, Taxonomy,
};
