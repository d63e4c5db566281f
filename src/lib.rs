//! # Isaithalam catalog core
//!
//! Aggregates track metadata from two third-party music catalogs, normalizes
//! it into one `Track` shape and merges it with the locally stored catalog.
//!
//! ```ignore
//! let config = isaithalam::Config::from_env()?;
//! let catalog = isaithalam::open_catalog(&config)?;
//! let tracks = catalog.search("ilaiyaraaja").await;
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod data;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

pub use config::Config;
pub use models::{ProviderTag, Track, TrackOrigin};
pub use services::{CatalogService, FallbackAggregator, PlaySeed};

/// Wire the SQLite store and both provider clients into a catalog service.
pub fn open_catalog(
    config: &Config,
) -> Result<CatalogService, Box<dyn std::error::Error + Send + Sync>> {
    let store = data::SqliteStore::open(&config.db_path)?;
    let primary = api::PrimaryClient::new(&config.primary_api_base, &config.primary_http())?;
    let secondary = api::SecondaryClient::new(
        &config.secondary_api_base,
        config.secondary_search_limit,
        &config.secondary_http(),
    )?;

    let aggregator = FallbackAggregator::new(Arc::new(primary), Arc::new(secondary))
        .with_trending_seed(config.trending_seed_query.clone())
        .with_play_seed(config.play_seed);

    Ok(CatalogService::new(Arc::new(store), aggregator))
}
