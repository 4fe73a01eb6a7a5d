//! Metrics collection module
//!
//! Tracks how searches end and how often the rewrite step is used or skipped.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide relay counters
#[derive(Debug, Default)]
pub struct Metrics {
    searches: AtomicU64,
    rewrites_applied: AtomicU64,
    rewrites_failed: AtomicU64,
    upstream_errors: AtomicU64,
    no_results: AtomicU64,
    successes: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an accepted (validated) search
    pub fn inc_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rewrite_applied(&self) {
        self.rewrites_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rewrite_failed(&self) {
        self.rewrites_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_no_results(&self) {
        self.no_results.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            rewrites_applied: self.rewrites_applied.load(Ordering::Relaxed),
            rewrites_failed: self.rewrites_failed.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
            no_results: self.no_results.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
        }
    }
}

/// Serializable view of [`Metrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub searches: u64,
    pub rewrites_applied: u64,
    pub rewrites_failed: u64,
    pub upstream_errors: u64,
    pub no_results: u64,
    pub successes: u64,
}

impl MetricsSnapshot {
    /// Share of rewrite attempts that fell back to the original query
    pub fn rewrite_fallback_rate(&self) -> f64 {
        let attempts = self.rewrites_applied + self.rewrites_failed;
        if attempts == 0 {
            0.0
        } else {
            (self.rewrites_failed as f64 / attempts as f64) * 100.0
        }
    }
}
