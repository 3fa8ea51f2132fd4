//! Prometheus metrics collection.
//!
//! Provides application metrics in Prometheus format.

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;

/// Application metrics.
pub struct Metrics {
    registry: Registry,

    /// Completed menu resolutions.
    pub menu_resolutions: Counter,

    /// Menu resolution duration.
    pub resolve_duration_seconds: Histogram,

    /// Requests answered with the empty gated result.
    pub gated_requests: Counter,

    /// Page lookups that landed on the "under development" state.
    pub pages_not_implemented: Counter,

    /// Store reads that failed and surfaced as retryable errors.
    pub store_failures: Counter,
}

impl Metrics {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let menu_resolutions = Counter::default();
        registry.register(
            "menu_resolutions_total",
            "Completed menu resolutions",
            menu_resolutions.clone(),
        );

        let resolve_duration_seconds = Histogram::new(exponential_buckets(0.0001, 2.0, 14));
        registry.register(
            "menu_resolve_duration_seconds",
            "Menu resolution duration in seconds",
            resolve_duration_seconds.clone(),
        );

        let gated_requests = Counter::default();
        registry.register(
            "gated_requests_total",
            "Requests answered with the empty gated result",
            gated_requests.clone(),
        );

        let pages_not_implemented = Counter::default();
        registry.register(
            "pages_not_implemented_total",
            "Page lookups that hit the under-development state",
            pages_not_implemented.clone(),
        );

        let store_failures = Counter::default();
        registry.register(
            "store_failures_total",
            "Failed backing-store reads",
            store_failures.clone(),
        );

        Self {
            registry,
            menu_resolutions,
            resolve_duration_seconds,
            gated_requests,
            pages_not_implemented,
            store_failures,
        }
    }

    /// Encode all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut output = String::new();
        if encode(&mut output, &self.registry).is_err() {
            tracing::warn!("failed to encode metrics");
        }
        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
