//! Places-Relay: free-text place search with map-ready results
//!
//! Accepts a free-text place query, optionally rewrites it into a cleaner search
//! phrase with a language-model service, forwards it to Google Places Text
//! Search and returns the top match with an embeddable map and a map link.

pub mod config;
pub mod maps;
pub mod metrics;
pub mod network;
pub mod places;
pub mod results;
pub mod rewriter;
pub mod search;
pub mod web;

pub use config::Settings;
pub use search::{SearchError, SearchOrchestrator, SearchRequest, SearchResponse};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
