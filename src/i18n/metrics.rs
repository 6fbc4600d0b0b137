//! Lookup metrics and observability module.
//!
//! Tracks how often lookups resolve in the requested language, fall back to
//! the default language, or miss every dictionary.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Lookup counters.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Lookups answered by the requested language's dictionary
    hits: AtomicUsize,

    /// Lookups answered by the default language's dictionary
    fallbacks: AtomicUsize,

    /// Lookups that returned the key unchanged
    misses: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// Create a fresh, zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide metrics instance fed by `LanguageRegistry::lookup`.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    /// Record a lookup resolved in the requested language.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup resolved through the default language.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that found nothing.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let misses = self.misses();
        let total = hits + fallbacks + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: total,
            hits,
            fallbacks,
            misses,
            hit_rate,
        }
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Total lookups
    pub lookups: usize,

    pub hits: usize,

    pub fallbacks: usize,

    pub misses: usize,

    /// Share of lookups answered by the requested language, as a percentage (0-100)
    pub hit_rate: f64,
}
