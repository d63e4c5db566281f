//! Services module - business logic layer
//!
//! Normalization, provider fallback and the local/remote merge live here,
//! independent of any caller surface.

pub mod aggregator;
pub mod catalog;
pub mod normalizer;

// Re-export commonly used types
pub use aggregator::{FallbackAggregator, PlaySeed};
pub use catalog::CatalogService;
pub use normalizer::normalize;
