//! End-to-end search pipeline

use super::error::SearchError;
use super::models::{SearchRequest, SearchResponse};
use crate::maps::MapLinkBuilder;
use crate::metrics::Metrics;
use crate::places::PlaceSearcher;
use crate::results::{select, SelectionResult};
use crate::rewriter::{QueryRewriter, RewriteOutcome};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs validate, rewrite, search, select, enrich and assemble in order
pub struct SearchOrchestrator {
    rewriter: Arc<dyn QueryRewriter>,
    searcher: Arc<dyn PlaceSearcher>,
    maps: MapLinkBuilder,
    metrics: Arc<Metrics>,
}

impl SearchOrchestrator {
    pub fn new(
        rewriter: Arc<dyn QueryRewriter>,
        searcher: Arc<dyn PlaceSearcher>,
        maps: MapLinkBuilder,
    ) -> Self {
        Self {
            rewriter,
            searcher,
            maps,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Share a metrics collector with the caller
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Handle one search request
    pub async fn handle(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let original_query = request.query.trim();
        if original_query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        self.metrics.inc_search();
        let start = Instant::now();

        let parsed_query = if request.use_rewriter {
            self.rewrite(original_query).await
        } else {
            original_query.to_string()
        };

        let candidates = match self.searcher.search(&parsed_query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(
                    "{} failed for '{}': {}",
                    self.searcher.name(),
                    parsed_query,
                    e
                );
                self.metrics.record_upstream_error();
                return Err(e.into());
            }
        };
        let candidate_count = candidates.len();

        let place = match select(&candidates) {
            SelectionResult::Selected(place) => place,
            SelectionResult::Empty => {
                info!("No places found for '{}'", parsed_query);
                self.metrics.record_no_results();
                return Err(SearchError::NoResults {
                    query_used: parsed_query,
                });
            }
        };

        let embed = self.maps.build_embed(&place.place_id);
        let maps_link = self.maps.build_maps_link(place.name.as_deref(), &place.place_id);

        info!(
            "Search '{}' resolved to {} of {} candidates in {:?}",
            parsed_query,
            place.place_id,
            candidate_count,
            start.elapsed()
        );
        self.metrics.record_success();

        Ok(SearchResponse {
            original_query: original_query.to_string(),
            parsed_query,
            place: place.into(),
            map_iframe: embed.markup,
            map_embed_src: embed.src,
            maps_link,
            candidate_count,
        })
    }

    /// Rewrite step; every failure falls back to the original query
    async fn rewrite(&self, original_query: &str) -> String {
        let outcome = self.rewriter.rewrite(original_query).await;
        match &outcome {
            RewriteOutcome::Rewritten(text) => {
                debug!("Rewrote '{}' as '{}'", original_query, text);
                self.metrics.record_rewrite_applied();
            }
            RewriteOutcome::Failed(reason) => {
                warn!(
                    "{} rewrite failed, using original query: {}",
                    self.rewriter.name(),
                    reason
                );
                self.metrics.record_rewrite_failed();
            }
        }
        outcome.or_original(original_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoogleSettings;
    use crate::places::{PlaceCandidate, SearchServiceError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeRewriter {
        outcome: RewriteOutcome,
        calls: AtomicUsize,
    }

    impl FakeRewriter {
        fn new(outcome: RewriteOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QueryRewriter for FakeRewriter {
        fn name(&self) -> &str {
            "fake"
        }

        async fn rewrite(&self, _query: &str) -> RewriteOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    struct FakeSearcher {
        result: fn() -> Result<Vec<PlaceCandidate>, SearchServiceError>,
        queries: Mutex<Vec<String>>,
    }

    impl FakeSearcher {
        fn new(result: fn() -> Result<Vec<PlaceCandidate>, SearchServiceError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                queries: Mutex::new(vec![]),
            })
        }

        fn last_query(&self) -> Option<String> {
            self.queries.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl PlaceSearcher for FakeSearcher {
        fn name(&self) -> &str {
            "fake"
        }

        async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, SearchServiceError> {
            self.queries.lock().unwrap().push(query.to_string());
            (self.result)()
        }
    }

    fn one_ramen() -> Result<Vec<PlaceCandidate>, SearchServiceError> {
        Ok(vec![PlaceCandidate::new("Ramen Ichiban", "p1")
            .with_address("Jl. Sudirman, Jakarta")
            .with_location(-6.2, 106.8)])
    }

    fn three_places() -> Result<Vec<PlaceCandidate>, SearchServiceError> {
        Ok(vec![
            PlaceCandidate::new("First", "p1"),
            PlaceCandidate::new("Second", "p2"),
            PlaceCandidate::new("Third", "p3"),
        ])
    }

    fn nothing() -> Result<Vec<PlaceCandidate>, SearchServiceError> {
        Ok(vec![])
    }

    fn unavailable() -> Result<Vec<PlaceCandidate>, SearchServiceError> {
        Err(SearchServiceError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    fn maps() -> MapLinkBuilder {
        MapLinkBuilder::new(&GoogleSettings {
            api_key: "KEY".to_string(),
            ..Default::default()
        })
    }

    fn orchestrator(
        rewriter: Arc<FakeRewriter>,
        searcher: Arc<FakeSearcher>,
    ) -> SearchOrchestrator {
        SearchOrchestrator::new(rewriter, searcher, maps())
    }

    #[tokio::test]
    async fn test_rewritten_query_is_searched() {
        let rewriter = FakeRewriter::new(RewriteOutcome::Rewritten("ramen Jakarta".to_string()));
        let searcher = FakeSearcher::new(one_ramen);
        let orch = orchestrator(rewriter.clone(), searcher.clone());

        let response = orch
            .handle(&SearchRequest::new("Cari ramen enak di Jakarta"))
            .await
            .unwrap();

        assert_eq!(response.original_query, "Cari ramen enak di Jakarta");
        assert_eq!(response.parsed_query, "ramen Jakarta");
        assert_eq!(searcher.last_query().as_deref(), Some("ramen Jakarta"));
        assert_eq!(response.place.name.as_deref(), Some("Ramen Ichiban"));
        assert_eq!(response.place.address.as_deref(), Some("Jl. Sudirman, Jakarta"));
        assert!(response.map_embed_src.contains("place_id:p1"));
        assert!(response.map_iframe.contains(&response.map_embed_src));
        assert!(response.maps_link.contains("query=Ramen+Ichiban"));
        assert_eq!(response.candidate_count, 1);
    }

    #[tokio::test]
    async fn test_rewriter_skipped_when_disabled() {
        let rewriter = FakeRewriter::new(RewriteOutcome::Rewritten("should not be used".to_string()));
        let searcher = FakeSearcher::new(one_ramen);
        let orch = orchestrator(rewriter.clone(), searcher.clone());

        let response = orch
            .handle(&SearchRequest::new("  ramen  ").with_rewriter(false))
            .await
            .unwrap();

        assert_eq!(rewriter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(response.original_query, "ramen");
        assert_eq!(response.parsed_query, "ramen");
    }

    #[tokio::test]
    async fn test_failed_rewrite_falls_back() {
        let rewriter = FakeRewriter::new(RewriteOutcome::Failed("connection refused".to_string()));
        let searcher = FakeSearcher::new(one_ramen);
        let orch = orchestrator(rewriter.clone(), searcher.clone());

        let response = orch
            .handle(&SearchRequest::new("Cari ramen enak di Jakarta"))
            .await
            .unwrap();

        assert_eq!(rewriter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(response.parsed_query, "Cari ramen enak di Jakarta");
        assert_eq!(orch.metrics().snapshot().rewrites_failed, 1);
    }

    #[tokio::test]
    async fn test_blank_query_rejected_before_any_call() {
        let rewriter = FakeRewriter::new(RewriteOutcome::Failed("unused".to_string()));
        let searcher = FakeSearcher::new(one_ramen);
        let orch = orchestrator(rewriter.clone(), searcher.clone());

        let err = orch.handle(&SearchRequest::new("   ")).await.unwrap_err();

        assert!(matches!(err, SearchError::EmptyQuery));
        assert_eq!(rewriter.calls.load(Ordering::SeqCst), 0);
        assert!(searcher.last_query().is_none());
        assert_eq!(orch.metrics().snapshot().searches, 0);
    }

    #[tokio::test]
    async fn test_first_candidate_wins() {
        let orch = orchestrator(
            FakeRewriter::new(RewriteOutcome::Failed("off".to_string())),
            FakeSearcher::new(three_places),
        );

        let response = orch.handle(&SearchRequest::new("anything")).await.unwrap();

        assert_eq!(response.place.place_id, "p1");
        assert_eq!(response.candidate_count, 3);
        assert!(response.place.location.is_none());
    }

    #[tokio::test]
    async fn test_empty_results_report_query_used() {
        let orch = orchestrator(
            FakeRewriter::new(RewriteOutcome::Rewritten("ramen Jakarta".to_string())),
            FakeSearcher::new(nothing),
        );

        let err = orch
            .handle(&SearchRequest::new("Cari ramen enak di Jakarta"))
            .await
            .unwrap_err();

        match err {
            SearchError::NoResults { query_used } => assert_eq!(query_used, "ramen Jakarta"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(orch.metrics().snapshot().no_results, 1);
    }

    #[tokio::test]
    async fn test_search_failure_is_upstream_error() {
        let orch = orchestrator(
            FakeRewriter::new(RewriteOutcome::Failed("off".to_string())),
            FakeSearcher::new(unavailable),
        );

        let err = orch.handle(&SearchRequest::new("ramen")).await.unwrap_err();

        match err {
            SearchError::Upstream { detail } => assert_eq!(detail, "HTTP 503: unavailable"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(orch.metrics().snapshot().upstream_errors, 1);
    }

    #[tokio::test]
    async fn test_identical_requests_identical_responses() {
        let orch = orchestrator(
            FakeRewriter::new(RewriteOutcome::Rewritten("ramen Jakarta".to_string())),
            FakeSearcher::new(one_ramen),
        );
        let request = SearchRequest::new("Cari ramen enak di Jakarta");

        let first = serde_json::to_vec(&orch.handle(&request).await.unwrap()).unwrap();
        let second = serde_json::to_vec(&orch.handle(&request).await.unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
