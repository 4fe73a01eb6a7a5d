//! Search request and response models

use crate::places::{LatLng, PlaceCandidate};
use serde::Serialize;

/// One inbound search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query as the caller sent it
    pub query: String,
    /// Whether to run the rewrite step
    pub use_rewriter: bool,
}

impl SearchRequest {
    /// Request with the rewriter enabled
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            use_rewriter: true,
        }
    }

    pub fn with_rewriter(mut self, use_rewriter: bool) -> Self {
        self.use_rewriter = use_rewriter;
        self
    }
}

/// Selected place as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSummary {
    pub name: Option<String>,
    pub address: Option<String>,
    pub place_id: String,
    pub location: Option<LatLng>,
}

impl From<PlaceCandidate> for PlaceSummary {
    fn from(candidate: PlaceCandidate) -> Self {
        Self {
            name: candidate.name,
            address: candidate.formatted_address,
            place_id: candidate.place_id,
            location: candidate.location,
        }
    }
}

/// Successful search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    /// Trimmed query as received
    pub original_query: String,
    /// Query actually sent to the places search
    pub parsed_query: String,
    pub place: PlaceSummary,
    pub map_iframe: String,
    pub map_embed_src: String,
    pub maps_link: String,
    /// Number of candidates the search returned, not just the selected one
    pub candidate_count: usize,
}
