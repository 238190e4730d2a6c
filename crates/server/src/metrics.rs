//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the marquee server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Authentication failures
//! - Catalog size (collected dynamically on scrape)

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "marquee_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "marquee_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Authentication failures.
pub static AUTH_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "marquee_auth_failures_total",
            "Total authentication failures",
        ),
        &["reason"],
    )
    .unwrap()
});

// =============================================================================
// Catalog Metrics (collected dynamically)
// =============================================================================

/// Movies currently in the catalog.
pub static MOVIES_TOTAL: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("marquee_movies_total", "Number of movies in the catalog").unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(AUTH_FAILURES_TOTAL.clone()))
        .unwrap();

    // Catalog
    registry.register(Box::new(MOVIES_TOTAL.clone())).unwrap();

    // Core metrics (catalog operations, slug collisions, store errors)
    for metric in marquee_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Refresh gauges that mirror current catalog state.
///
/// Called before encoding so a scrape reports the catalog as it is now,
/// not as it was when the last request touched it.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    match state.service().total_movies() {
        Ok(total) => MOVIES_TOTAL.set(total as i64),
        Err(e) => warn!("Failed to count movies for metrics: {}", e),
    }
}

/// Normalize a path for metric labels (replace tokens with placeholders).
pub fn normalize_path(path: &str) -> String {
    // Numeric ids go first so the slug pattern cannot swallow them
    let numeric_regex = regex_lite::Regex::new(r"/\d+(/|$)").unwrap();
    let slug_regex = regex_lite::Regex::new(r"/movies/[A-Za-z0-9][A-Za-z0-9-]*(/|$)").unwrap();

    let result = numeric_regex.replace_all(path, "/{id}$1");
    let result = slug_regex.replace_all(&result, "/movies/{slug}$1");
    result.to_string()
}
