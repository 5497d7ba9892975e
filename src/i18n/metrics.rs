//! Negotiation metrics.
//!
//! Process-wide counters for prefix matches and rewrites, reported as JSON by
//! the host.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Negotiation counters.
#[derive(Debug, Default)]
pub struct NegotiationMetrics {
    /// Requests whose first segment decoded to a pair
    prefix_matches: AtomicUsize,

    /// Requests without a recognized prefix
    prefix_misses: AtomicUsize,

    /// Inbound paths that had a prefix stripped
    inbound_rewrites: AtomicUsize,

    /// Outbound URLs that received a prefix
    outbound_prefixed: AtomicUsize,

    /// Outbound rewrites that failed (e.g., no countries configured)
    outbound_failures: AtomicUsize,
}

static METRICS: OnceLock<NegotiationMetrics> = OnceLock::new();

impl NegotiationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global metrics instance.
    pub fn global() -> &'static NegotiationMetrics {
        METRICS.get_or_init(NegotiationMetrics::new)
    }

    pub fn record_prefix_match(&self) {
        self.prefix_matches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_prefix_miss(&self) {
        self.prefix_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inbound_rewrite(&self) {
        self.inbound_rewrites.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outbound_prefixed(&self) {
        self.outbound_prefixed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outbound_failure(&self) {
        self.outbound_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn prefix_matches(&self) -> usize {
        self.prefix_matches.load(Ordering::Relaxed)
    }

    pub fn prefix_misses(&self) -> usize {
        self.prefix_misses.load(Ordering::Relaxed)
    }

    pub fn inbound_rewrites(&self) -> usize {
        self.inbound_rewrites.load(Ordering::Relaxed)
    }

    pub fn outbound_prefixed(&self) -> usize {
        self.outbound_prefixed.load(Ordering::Relaxed)
    }

    pub fn outbound_failures(&self) -> usize {
        self.outbound_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let matches = self.prefix_matches();
        let misses = self.prefix_misses();
        let total = matches + misses;
        let match_rate = if total > 0 {
            (matches as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            prefix_matches: matches,
            prefix_misses: misses,
            match_rate,
            inbound_rewrites: self.inbound_rewrites(),
            outbound_prefixed: self.outbound_prefixed(),
            outbound_failures: self.outbound_failures(),
        }
    }
}

/// Snapshot of the negotiation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub prefix_matches: usize,
    pub prefix_misses: usize,

    /// Share of negotiations that matched, as a percentage (0-100)
    pub match_rate: f64,

    pub inbound_rewrites: usize,
    pub outbound_prefixed: usize,
    pub outbound_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters() {
        let metrics = NegotiationMetrics::new();
        metrics.record_prefix_match();
        metrics.record_prefix_match();
        metrics.record_prefix_miss();
        metrics.record_inbound_rewrite();
        metrics.record_outbound_prefixed();
        metrics.record_outbound_failure();

        assert_eq!(metrics.prefix_matches(), 2);
        assert_eq!(metrics.prefix_misses(), 1);
        assert_eq!(metrics.inbound_rewrites(), 1);
        assert_eq!(metrics.outbound_prefixed(), 1);
        assert_eq!(metrics.outbound_failures(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = NegotiationMetrics::new().report();
        assert_eq!(report.prefix_matches, 0);
        assert_eq!(report.match_rate, 0.0);
    }

    #[test]
    fn test_report_match_rate() {
        let metrics = NegotiationMetrics::new();

        // 3 matches, 1 miss = 75%
        metrics.record_prefix_match();
        metrics.record_prefix_match();
        metrics.record_prefix_match();
        metrics.record_prefix_miss();

        assert_eq!(metrics.report().match_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(NegotiationMetrics::new().report()).expect("serialize");
        assert_eq!(json["prefix_misses"], 0);
        assert!(json.get("outbound_failures").is_some());
    }

    // ==================== Singleton Tests ====================

    #[test]
    fn test_global_returns_same_instance() {
        let metrics1 = NegotiationMetrics::global();
        let metrics2 = NegotiationMetrics::global();
        assert!(std::ptr::eq(metrics1, metrics2));
    }

    #[test]
    fn test_global_counts_persist() {
        let metrics = NegotiationMetrics::global();
        let initial = metrics.inbound_rewrites();
        metrics.record_inbound_rewrite();
        assert!(NegotiationMetrics::global().inbound_rewrites() > initial);
    }
}
