//! Google Places Text Search implementation
//!
//! Uses the official Places API (legacy Text Search, JSON output).

use super::types::{PlaceCandidate, TextSearchResponse};
use super::{PlaceSearcher, SearchServiceError};
use crate::config::GoogleSettings;
use crate::network::{HttpClient, HttpRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Statuses that mean the query itself was served
const SERVED_STATUSES: [&str; 2] = ["OK", "ZERO_RESULTS"];

/// Google Places Text Search client
pub struct GooglePlaces {
    client: HttpClient,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GooglePlaces {
    pub fn new(client: HttpClient, settings: &GoogleSettings) -> Self {
        Self {
            client,
            endpoint: settings.places_endpoint.clone(),
            api_key: settings.api_key.clone(),
            timeout: Duration::from_secs_f64(settings.search_timeout),
        }
    }

    fn request(&self, query: &str) -> HttpRequest {
        HttpRequest::get(&self.endpoint)
            .param("query", query)
            .param("key", &self.api_key)
    }

    fn parse(text: &str) -> Result<Vec<PlaceCandidate>, SearchServiceError> {
        let body: TextSearchResponse = serde_json::from_str(text)
            .map_err(|e| SearchServiceError::Malformed(e.to_string()))?;

        if let Some(status) = body.status {
            if !SERVED_STATUSES.contains(&status.as_str()) {
                return Err(SearchServiceError::Rejected {
                    status,
                    message: body.error_message.unwrap_or_default(),
                });
            }
        }

        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(PlaceCandidate::from)
            .collect())
    }
}

#[async_trait]
impl PlaceSearcher for GooglePlaces {
    fn name(&self) -> &str {
        "google_places"
    }

    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchServiceError> {
        let response = self
            .client
            .execute(self.request(query), self.timeout)
            .await
            .map_err(|e| SearchServiceError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(SearchServiceError::Status {
                status: response.status,
                body: response.excerpt(),
            });
        }

        let candidates = Self::parse(&response.text)?;
        debug!("{} returned {} candidates", self.name(), candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_query_and_key() {
        let settings = GoogleSettings {
            api_key: "k".to_string(),
            ..Default::default()
        };
        let places = GooglePlaces::new(HttpClient::new().unwrap(), &settings);
        let request = places.request("ramen Jakarta");

        assert!(request.url.ends_with("/textsearch/json"));
        assert_eq!(request.params.get("query").unwrap(), "ramen Jakarta");
        assert_eq!(request.params.get("key").unwrap(), "k");
    }

    #[test]
    fn test_parse_keeps_order_and_tolerates_missing_geometry() {
        let text = r#"{
            "status": "OK",
            "results": [
                {"name": "B", "formatted_address": "Jl. B", "place_id": "pb",
                 "geometry": {"location": {"lat": -6.2, "lng": 106.8}}},
                {"name": "A", "place_id": "pa"}
            ]
        }"#;
        let candidates = GooglePlaces::parse(text).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].place_id, "pb");
        assert_eq!(candidates[0].location.unwrap().lat, -6.2);
        assert_eq!(candidates[1].name.as_deref(), Some("A"));
        assert!(candidates[1].location.is_none());
        assert!(candidates[1].formatted_address.is_none());
    }

    #[test]
    fn test_zero_results_is_empty_not_error() {
        let candidates =
            GooglePlaces::parse(r#"{"status": "ZERO_RESULTS", "results": []}"#).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_null_or_missing_results_are_empty() {
        assert!(GooglePlaces::parse(r#"{"results": null}"#).unwrap().is_empty());
        assert!(GooglePlaces::parse(r#"{"status": "OK"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_bad_coordinates_drop_only_the_location() {
        let text = r#"{
            "status": "OK",
            "results": [
                {"name": "A", "place_id": "pa",
                 "geometry": {"location": {"lat": "north", "lng": 106.8}}},
                {"name": "B", "place_id": "pb", "geometry": null}
            ]
        }"#;
        let candidates = GooglePlaces::parse(text).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].place_id, "pa");
        assert!(candidates[0].location.is_none());
        assert!(candidates[1].location.is_none());
    }

    #[test]
    fn test_denied_status_is_rejected() {
        let err = GooglePlaces::parse(
            r#"{"status": "REQUEST_DENIED", "error_message": "bad key", "results": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SearchServiceError::Rejected { .. }));
        assert_eq!(err.to_string(), "REQUEST_DENIED: bad key");
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = GooglePlaces::parse("<html>").unwrap_err();
        assert!(matches!(err, SearchServiceError::Malformed(_)));
    }
}
