//! Application state shared across handlers

use super::limiter::ClientLimiter;
use crate::config::Settings;
use crate::maps::MapLinkBuilder;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::places::{GooglePlaces, PlaceSearcher};
use crate::rewriter::{OpenWebUiRewriter, QueryRewriter};
use crate::search::SearchOrchestrator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search pipeline
    pub search: Arc<SearchOrchestrator>,
    /// Relay counters
    pub metrics: Arc<Metrics>,
    /// Per-client admission control, absent when disabled
    pub limiter: Option<Arc<ClientLimiter>>,
}

impl AppState {
    /// Create new application state wired to the real services
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let rewriter: Arc<dyn QueryRewriter> =
            Arc::new(OpenWebUiRewriter::new(client.clone(), &settings.rewriter));
        let searcher: Arc<dyn PlaceSearcher> =
            Arc::new(GooglePlaces::new(client, &settings.google));
        Self::with_services(settings, rewriter, searcher)
    }

    /// Create state around caller-supplied services
    pub fn with_services(
        settings: Settings,
        rewriter: Arc<dyn QueryRewriter>,
        searcher: Arc<dyn PlaceSearcher>,
    ) -> anyhow::Result<Self> {
        let metrics = Arc::new(Metrics::new());
        let maps = MapLinkBuilder::new(&settings.google);
        let search = Arc::new(
            SearchOrchestrator::new(rewriter, searcher, maps).with_metrics(metrics.clone()),
        );

        let limiter = if settings.server.limiter {
            Some(Arc::new(ClientLimiter::new(
                settings.server.search_per_minute,
                settings.server.default_per_minute,
            )?))
        } else {
            None
        };

        Ok(Self {
            settings: Arc::new(settings),
            search,
            metrics,
            limiter,
        })
    }
}
