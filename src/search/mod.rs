//! Search orchestration module
//!
//! Runs one request through rewrite, search, selection and map enrichment,
//! and decides which failures reach the caller.

mod error;
mod models;
mod orchestrator;

pub use error::SearchError;
pub use models::*;
pub use orchestrator::SearchOrchestrator;
