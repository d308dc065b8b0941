//! Lab metrics and logging setup.
//!
//! Tracks generation progress and named event counters, and reports
//! milestones through `tracing`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Counters for a running lab.
pub struct Metrics {
    generation_count: AtomicU64,
    survivor_count: AtomicU64,
    creature_count: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            survivor_count: AtomicU64::new(0),
            creature_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Records a finished generation.
    pub fn record_generation(&self, duration: Duration, creatures: usize, survivors: usize, diversity: f64) {
        let generation = self.generation_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.creature_count.store(creatures as u64, Ordering::Relaxed);
        self.survivor_count.store(survivors as u64, Ordering::Relaxed);

        tracing::info!(
            generation = generation,
            creatures = creatures,
            survivors = survivors,
            diversity = diversity,
            duration_ms = duration.as_millis() as u64,
            "Generation finished"
        );
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value of a named counter, zero if it was never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn survivor_count(&self) -> u64 {
        self.survivor_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn creature_count(&self) -> u64 {
        self.creature_count.load(Ordering::Relaxed)
    }
}

/// Installs the global `tracing` subscriber at INFO level.
///
/// Calling it again is harmless; the first subscriber stays in place.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.generation_count(), 0);
        assert_eq!(metrics.counter("mutations"), 0);
    }

    #[test]
    fn test_record_generation() {
        let metrics = Metrics::new();
        metrics.record_generation(Duration::from_millis(16), 128, 40, 0.7);
        metrics.record_generation(Duration::from_millis(16), 128, 52, 0.6);
        assert_eq!(metrics.generation_count(), 2);
        assert_eq!(metrics.creature_count(), 128);
        assert_eq!(metrics.survivor_count(), 52);
    }

    #[test]
    fn test_counters() {
        let metrics = Metrics::new();
        metrics.increment_counter("mutations");
        metrics.add_to_counter("mutations", 4);
        assert_eq!(metrics.counter("mutations"), 5);
    }
}
