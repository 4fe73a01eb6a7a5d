//! Places search module
//!
//! Defines the place candidate model, the `PlaceSearcher` seam and the Google
//! Places Text Search implementation behind it.

mod google;
mod types;

pub use google::GooglePlaces;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the external places search. These are fatal to a request.
#[derive(Debug, Error)]
pub enum SearchServiceError {
    /// Connection failed or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 200 but refused the query (quota, key, ...).
    #[error("{status}: {message}")]
    Rejected { status: String, message: String },

    /// The body was not a recognizable search response.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Something that can turn a query string into an ordered list of candidates
#[async_trait]
pub trait PlaceSearcher: Send + Sync {
    /// Searcher name, used in logs
    fn name(&self) -> &str;

    /// Run a search; the returned order is the service's own ranking
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchServiceError>;
}
