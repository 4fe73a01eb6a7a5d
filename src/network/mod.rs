//! HTTP networking module
//!
//! Provides the outbound HTTP client shared by the rewriter and the places search.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{HttpMethod, HttpRequest, HttpResponse};
