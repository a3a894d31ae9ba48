// src/server/metrics.rs
//! Service metrics tracking
//!
//! Simple atomic counters for request and mutation statistics,
//! exposed on `/metrics` in Prometheus text format.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Service metrics collector
#[derive(Default)]
pub struct ServiceMetrics {
    /// Requests to the recipe endpoints
    requests_total: AtomicU64,
    recipes_created: AtomicU64,
    recipes_updated: AtomicU64,
    recipes_deleted: AtomicU64,
    /// Well-formed bodies that failed recipe validation
    validation_errors: AtomicU64,
    /// Bodies that could not be decoded at all
    bad_request_errors: AtomicU64,
    /// Requests addressing an unknown recipe
    not_found_errors: AtomicU64,
    /// Server start time
    start_time: std::sync::OnceLock<Instant>,
}

impl ServiceMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        let metrics = Self::default();
        let _ = metrics.start_time.set(Instant::now());
        metrics
    }

    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_created(&self) {
        self.recipes_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.recipes_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_deleted(&self) {
        self.recipes_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_error(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bad_request(&self) {
        self.bad_request_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time
            .get()
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            recipes_created: self.recipes_created.load(Ordering::Relaxed),
            recipes_updated: self.recipes_updated.load(Ordering::Relaxed),
            recipes_deleted: self.recipes_deleted.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            bad_request_errors: self.bad_request_errors.load(Ordering::Relaxed),
            not_found_errors: self.not_found_errors.load(Ordering::Relaxed),
            uptime_secs: self.uptime().as_secs(),
        }
    }
}

impl fmt::Debug for ServiceMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceMetrics").field(&self.snapshot()).finish()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub recipes_created: u64,
    pub recipes_updated: u64,
    pub recipes_deleted: u64,
    pub validation_errors: u64,
    pub bad_request_errors: u64,
    pub not_found_errors: u64,
    pub uptime_secs: u64,
}

impl MetricsSnapshot {
    /// Render in Prometheus text exposition format
    ///
    /// `recipes` is the current collection size, reported as a gauge.
    pub fn to_prometheus(&self, recipes: usize) -> String {
        format!(
            r#"# HELP recipe_box_requests_total Requests to recipe endpoints
# TYPE recipe_box_requests_total counter
recipe_box_requests_total {}

# HELP recipe_box_recipes Recipes currently stored
# TYPE recipe_box_recipes gauge
recipe_box_recipes {}

# HELP recipe_box_recipes_created_total Recipes created
# TYPE recipe_box_recipes_created_total counter
recipe_box_recipes_created_total {}

# HELP recipe_box_recipes_updated_total Recipes updated
# TYPE recipe_box_recipes_updated_total counter
recipe_box_recipes_updated_total {}

# HELP recipe_box_recipes_deleted_total Recipes deleted
# TYPE recipe_box_recipes_deleted_total counter
recipe_box_recipes_deleted_total {}

# HELP recipe_box_validation_errors_total Requests rejected by recipe validation
# TYPE recipe_box_validation_errors_total counter
recipe_box_validation_errors_total {}

# HELP recipe_box_bad_request_errors_total Requests with a malformed body
# TYPE recipe_box_bad_request_errors_total counter
recipe_box_bad_request_errors_total {}

# HELP recipe_box_not_found_errors_total Requests for unknown recipes
# TYPE recipe_box_not_found_errors_total counter
recipe_box_not_found_errors_total {}

# HELP recipe_box_uptime_seconds Seconds since the server started
# TYPE recipe_box_uptime_seconds gauge
recipe_box_uptime_seconds {}
"#,
            self.requests_total,
            recipes,
            self.recipes_created,
            self.recipes_updated,
            self.recipes_deleted,
            self.validation_errors,
            self.bad_request_errors,
            self.not_found_errors,
            self.uptime_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_basic() {
        let metrics = ServiceMetrics::new();

        metrics.record_request();
        metrics.record_request();
        metrics.record_created();
        metrics.record_deleted();
        metrics.record_validation_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_total, 2);
        assert_eq!(snapshot.recipes_created, 1);
        assert_eq!(snapshot.recipes_updated, 0);
        assert_eq!(snapshot.recipes_deleted, 1);
        assert_eq!(snapshot.validation_errors, 1);
        assert_eq!(snapshot.bad_request_errors, 0);
        assert_eq!(snapshot.not_found_errors, 0);
    }

    #[test]
    fn test_bad_request_counted_apart() {
        let metrics = ServiceMetrics::new();
        metrics.record_bad_request();
        metrics.record_bad_request();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.bad_request_errors, 2);
        assert_eq!(snapshot.validation_errors, 0);

        let text = snapshot.to_prometheus(0);
        assert!(text.contains("recipe_box_bad_request_errors_total 2\n"));
        assert!(text.contains("recipe_box_validation_errors_total 0\n"));
    }

    #[test]
    fn test_prometheus_output() {
        let metrics = ServiceMetrics::new();
        metrics.record_not_found();

        let text = metrics.snapshot().to_prometheus(3);
        assert!(text.contains("recipe_box_recipes 3\n"));
        assert!(text.contains("recipe_box_not_found_errors_total 1\n"));
        assert!(text.contains("# TYPE recipe_box_requests_total counter"));
    }
}
