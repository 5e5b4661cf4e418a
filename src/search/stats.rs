//! On-demand search telemetry.
//!
//! Nothing here runs on a timer: pollers call
//! [`SearchController::stats`](super::SearchController::stats) and the rate/runtime are
//! recomputed from stored instants and counters at that moment.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::constants::RATE_WINDOW;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Snapshot of a session's progress.
pub struct SearchStats {
    pub tested: u64,
    /// Phrases per second over the last completed window, one decimal.
    pub rate: f64,
    pub high_phi_count: u64,
    /// Elapsed wall time as `HH:MM:SS`.
    pub runtime: String,
    pub is_searching: bool,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            tested: 0,
            rate: 0.0,
            high_phi_count: 0,
            runtime: format_runtime(Duration::ZERO),
            is_searching: false,
        }
    }
}

/// Formats a duration as zero-padded `HH:MM:SS` (hours are not capped at 24).
pub fn format_runtime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Windowed throughput estimator.
///
/// A new rate is computed only once at least `window` has passed since the previous window
/// boundary; earlier samples return the last reported rate unchanged.
#[derive(Debug, Clone)]
pub struct RateSampler {
    window: Duration,
    boundary: Option<Instant>,
    boundary_tested: u64,
    rate: f64,
}

impl Default for RateSampler {
    fn default() -> Self {
        Self::new(RATE_WINDOW)
    }
}

impl RateSampler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            boundary: None,
            boundary_tested: 0,
            rate: 0.0,
        }
    }

    /// Starts a fresh window at `now` with `tested` already counted.
    pub fn reset(&mut self, now: Instant, tested: u64) {
        self.boundary = Some(now);
        self.boundary_tested = tested;
        self.rate = 0.0;
    }

    /// Returns the current rate, closing the window if it has elapsed.
    pub fn sample(&mut self, now: Instant, tested: u64) -> f64 {
        let Some(boundary) = self.boundary else {
            self.reset(now, tested);
            return self.rate;
        };

        let elapsed = now.saturating_duration_since(boundary);
        if elapsed < self.window {
            return self.rate;
        }

        let delta = tested.saturating_sub(self.boundary_tested) as f64;
        self.rate = (delta / elapsed.as_secs_f64() * 10.0).round() / 10.0;
        self.boundary = Some(now);
        self.boundary_tested = tested;
        self.rate
    }

    /// Last reported rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}
