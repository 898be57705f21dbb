//! Tracking loop

use std::time::Duration;

use chrono::Local;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::{sleep, Instant};

use crate::job::BenchmarkJob;
use crate::result::BenchmarkResult;
use crate::runner::ParallelRunner;
use crate::traits::CycleObserver;

use super::stats::TrackerStats;

/// Longest single sleep between shutdown checks
pub const MAX_SLEEP_SLICE: Duration = Duration::from_secs(1);

/// Lifecycle of a [`Tracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Built but not started
    Idle,
    /// Running cycles
    Running,
    /// Stopped after a shutdown signal
    Stopped,
}

/// Periodically re-runs the full fan-out and forwards each cycle's results.
pub struct Tracker {
    /// Runner used for every cycle
    runner: ParallelRunner,

    /// Jobs run in every cycle
    jobs: Vec<BenchmarkJob>,

    /// Prompt shared by every job
    prompt: String,

    /// Period between the end of one cycle and the start of the next
    interval: Duration,

    /// Result consumers, notified in order
    observers: Vec<Box<dyn CycleObserver>>,

    /// Current state
    state: TrackerState,
}

impl Tracker {
    /// Create a new tracker
    ///
    /// Use [`TrackerBuilder`](super::TrackerBuilder) for validated construction.
    pub fn new(
        runner: ParallelRunner,
        jobs: Vec<BenchmarkJob>,
        prompt: String,
        interval: Duration,
        observers: Vec<Box<dyn CycleObserver>>,
    ) -> Self {
        Self {
            runner,
            jobs,
            prompt,
            interval,
            observers,
            state: TrackerState::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Period between cycles
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run cycles until a shutdown signal arrives
    ///
    /// A closed shutdown channel counts as a signal, so the sender must
    /// outlive the loop.
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> TrackerStats {
        let mut stats = TrackerStats::new();
        stats.start();
        self.state = TrackerState::Running;

        tracing::info!(
            jobs = self.jobs.len(),
            interval_secs = self.interval.as_secs_f64(),
            observers = self.observers.len(),
            "Tracker started"
        );

        let mut next_run = Instant::now();

        loop {
            if shutdown_requested(&mut shutdown) {
                tracing::debug!("Tracker received shutdown signal");
                break;
            }

            let now = Instant::now();
            if now < next_run {
                let slice = (next_run - now).min(MAX_SLEEP_SLICE);
                tokio::select! {
                    biased;

                    _ = shutdown.recv() => {
                        tracing::debug!("Tracker received shutdown signal while waiting");
                        break;
                    }

                    _ = sleep(slice) => {}
                }
                continue;
            }

            let timestamp = Local::now();
            let cycle = stats.cycles + 1;
            tracing::info!(cycle, "Running benchmark cycle");
            self.notify_start(timestamp, &mut stats);

            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!(cycle, "Shutdown during cycle, abandoning in-flight calls");
                    break;
                }

                results = self.runner.run(&self.jobs, &self.prompt) => {
                    let successful = results.iter().filter(|r| r.success).count();
                    stats.record_cycle(results.len(), successful);
                    self.notify(timestamp, &results, &mut stats);
                }
            }

            next_run = Instant::now() + self.interval;
        }

        self.state = TrackerState::Stopped;
        stats.stop();

        tracing::info!(
            cycles = stats.cycles,
            results = stats.results,
            failed = stats.failed(),
            elapsed_secs = ?stats.elapsed().map(|d| d.as_secs_f64()),
            "Tracker stopped"
        );

        stats
    }

    fn notify_start(&mut self, timestamp: chrono::DateTime<Local>, stats: &mut TrackerStats) {
        for observer in &mut self.observers {
            if let Err(e) = observer.on_cycle_start(timestamp) {
                stats.record_observer_error();
                tracing::warn!(
                    observer = observer.name(),
                    error = %e,
                    "Observer failed at cycle start, continuing"
                );
            }
        }
    }

    fn notify(
        &mut self,
        timestamp: chrono::DateTime<Local>,
        results: &[BenchmarkResult],
        stats: &mut TrackerStats,
    ) {
        for observer in &mut self.observers {
            if let Err(e) = observer.on_cycle(timestamp, results) {
                stats.record_observer_error();
                tracing::warn!(
                    observer = observer.name(),
                    error = %e,
                    "Observer failed, continuing"
                );
            }
        }
    }
}

fn shutdown_requested(shutdown: &mut broadcast::Receiver<()>) -> bool {
    !matches!(shutdown.try_recv(), Err(TryRecvError::Empty))
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("runner", &self.runner)
            .field("jobs", &self.jobs.len())
            .field("interval", &self.interval)
            .field(
                "observers",
                &self.observers.iter().map(|o| o.name()).collect::<Vec<_>>(),
            )
            .field("state", &self.state)
            .finish()
    }
}
