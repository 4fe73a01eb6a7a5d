//! Per-client rate limiting

use super::state::AppState;
use anyhow::{anyhow, Result};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Keyed limiters: a tighter one for `/search`, a looser one for the rest
pub struct ClientLimiter {
    search: KeyedLimiter,
    default: KeyedLimiter,
}

impl ClientLimiter {
    pub fn new(search_per_minute: u32, default_per_minute: u32) -> Result<Self> {
        Ok(Self::with_quotas(
            per_minute(search_per_minute)?,
            per_minute(default_per_minute)?,
        ))
    }

    pub fn with_quotas(search: Quota, default: Quota) -> Self {
        Self {
            search: RateLimiter::keyed(search),
            default: RateLimiter::keyed(default),
        }
    }

    /// Number of clients currently tracked across both limiters
    pub fn len(&self) -> usize {
        self.search.len() + self.default.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget clients whose quota has fully replenished
    pub fn prune(&self) {
        self.search.retain_recent();
        self.default.retain_recent();
        self.search.shrink_to_fit();
        self.default.shrink_to_fit();
    }

    /// Prune on a fixed period for as long as the runtime lives
    pub fn spawn_pruner(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let before = self.len();
                self.prune();
                debug!("Pruned rate limiter: {} -> {} tracked clients", before, self.len());
            }
        })
    }

    /// Whether `client` may make another call to `path` right now
    pub fn check(&self, client: IpAddr, path: &str) -> bool {
        let limiter = if path == "/search" {
            &self.search
        } else {
            &self.default
        };
        limiter.check_key(&client).is_ok()
    }
}

fn per_minute(count: u32) -> Result<Quota> {
    NonZeroU32::new(count)
        .map(Quota::per_minute)
        .ok_or_else(|| anyhow!("rate limit quota must be greater than zero"))
}

/// Middleware rejecting clients over quota with 429
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(ref limiter) = state.limiter {
        let client = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        if !limiter.check(client, request.uri().path()) {
            warn!("Rate limit exceeded for {} on {}", client, request.uri().path());
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({ "error": "Too many requests" })),
            )
                .into_response();
        }
    }

    next.run(request).await
}
