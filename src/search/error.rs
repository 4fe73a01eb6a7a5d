//! Errors surfaced to the caller of a search

use crate::places::SearchServiceError;
use thiserror::Error;

/// Terminal failures of a search request. A failed rewrite is never one of these.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was missing or blank after trimming.
    #[error("Missing 'query' in request body")]
    EmptyQuery,

    /// The places search failed; carries the underlying detail.
    #[error("Google Places API error: {detail}")]
    Upstream { detail: String },

    /// The search succeeded but returned no candidates.
    #[error("No places found for '{query_used}'")]
    NoResults { query_used: String },
}

impl From<SearchServiceError> for SearchError {
    fn from(err: SearchServiceError) -> Self {
        SearchError::Upstream {
            detail: err.to_string(),
        }
    }
}
