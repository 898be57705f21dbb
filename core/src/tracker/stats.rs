//! Tracker statistics

use std::time::Duration;

use tokio::time::Instant;

/// Totals collected while a tracker runs
#[derive(Debug, Default, Clone)]
pub struct TrackerStats {
    /// Cycles that ran to completion
    pub cycles: usize,

    /// Results delivered to observers across all cycles
    pub results: usize,

    /// Successful results across all cycles
    pub successful: usize,

    /// Observer calls that returned an error
    pub observer_errors: usize,

    /// Tracker start time
    pub started_at: Option<Instant>,

    /// Tracker end time
    pub ended_at: Option<Instant>,
}

impl TrackerStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking (records start time)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time)
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Record one completed cycle
    pub fn record_cycle(&mut self, results: usize, successful: usize) {
        self.cycles += 1;
        self.results += results;
        self.successful += successful;
    }

    /// Record a failed observer call
    pub fn record_observer_error(&mut self) {
        self.observer_errors += 1;
    }

    /// Failed results across all cycles
    pub fn failed(&self) -> usize {
        self.results - self.successful
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }
}
