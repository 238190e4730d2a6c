//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Catalog (creations, list queries, rejected queries)
//! - Slug resolution (insert-time collisions)
//! - Storage (errors by operation)

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

// =============================================================================
// Catalog Metrics
// =============================================================================

/// Movies created total.
pub static MOVIES_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("marquee_movies_created_total", "Total movies created").unwrap()
});

/// Slug collisions detected at insert time.
pub static SLUG_COLLISIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_slug_collisions_total",
        "Total slug conflicts hit at insert time",
    )
    .unwrap()
});

/// List queries served total.
pub static LIST_QUERIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("marquee_list_queries_total", "Total list queries received").unwrap()
});

/// List queries rejected by parameter validation.
pub static QUERY_REJECTIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "marquee_query_rejections_total",
        "Total list queries rejected by parameter validation",
    )
    .unwrap()
});

// =============================================================================
// Storage Metrics
// =============================================================================

/// Store errors total by operation.
pub static STORE_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("marquee_store_errors_total", "Total storage errors"),
        &["operation"], // "count", "fetch", "insert", "update", "delete", "view"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(MOVIES_CREATED.clone()),
        Box::new(SLUG_COLLISIONS.clone()),
        Box::new(LIST_QUERIES.clone()),
        Box::new(QUERY_REJECTIONS.clone()),
        Box::new(STORE_ERRORS.clone()),
    ]
}
